// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry: per event name, bindings kept in ascending priority order.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::types::Callback;

pub(crate) struct Binding<K, S> {
    pub(crate) priority: i32,
    pub(crate) node: K,
    pub(crate) callback: Callback<K, S>,
}

pub(crate) struct Listeners<K, S> {
    bindings: HashMap<String, Vec<Binding<K, S>>>,
    // Event names in first-registration order.
    names: Vec<String>,
}

impl<K, S> Default for Listeners<K, S> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
            names: Vec::new(),
        }
    }
}

impl<K, S> Listeners<K, S> {
    /// Insert before the first binding whose priority is not lower.
    ///
    /// Returns true if this is the first binding for `event`.
    pub(crate) fn insert(&mut self, event: &str, binding: Binding<K, S>) -> bool {
        let is_new = match self.bindings.get_mut(event) {
            Some(list) => {
                let at = list.partition_point(|b| b.priority < binding.priority);
                list.insert(at, binding);
                false
            }
            None => {
                self.bindings.insert(String::from(event), alloc::vec![binding]);
                true
            }
        };
        if is_new {
            self.names.push(String::from(event));
        }
        is_new
    }

    pub(crate) fn get(&self, event: &str) -> Option<&[Binding<K, S>]> {
        self.bindings.get(event).map(Vec::as_slice)
    }

    pub(crate) fn get_mut(&mut self, event: &str) -> Option<&mut [Binding<K, S>]> {
        self.bindings.get_mut(event).map(Vec::as_mut_slice)
    }

    pub(crate) fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn clear(&mut self) {
        self.bindings.clear();
        self.names.clear();
    }
}
