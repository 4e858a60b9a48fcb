// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dependency registry: relations declared between event names, applied once both
//! recognizers exist.

use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::{GestureEngine, Relation};
use crate::kind::recognizer_name;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Dependency {
    pub(crate) relation: Relation,
    pub(crate) target: String,
    pub(crate) base: String,
}

/// Declarations not yet applied, in declaration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct Dependencies {
    pending: Vec<Dependency>,
}

impl Dependencies {
    pub(crate) fn push(&mut self, relation: Relation, target: &str, base: &str) {
        self.pending.push(Dependency {
            relation,
            target: String::from(target),
            base: String::from(base),
        });
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }

    /// Apply pending declarations in order; applied ones leave the queue.
    ///
    /// With `created`, only declarations naming that recognizer are attempted.
    /// Returns the number applied.
    pub(crate) fn apply<E: GestureEngine>(
        &mut self,
        engine: &mut E,
        created: Option<&str>,
    ) -> usize {
        let before = self.pending.len();
        self.pending.retain(|dep| {
            let (Some(target), Some(base)) =
                (recognizer_name(&dep.target), recognizer_name(&dep.base))
            else {
                log::debug!(
                    "dependency {} {} {} names an unknown gesture; kept queued",
                    dep.target,
                    dep.relation,
                    dep.base
                );
                return true;
            };
            if created.is_some_and(|name| name != target && name != base) {
                return true;
            }
            if engine.relate(&target, dep.relation, &base) {
                log::trace!("applied {target} {} {base}", dep.relation);
                false
            } else {
                log::debug!(
                    "dependency {target} {} {base} waits for its recognizers",
                    dep.relation
                );
                true
            }
        });
        before - self.pending.len()
    }
}
