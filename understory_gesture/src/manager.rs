// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`GestureEngine`].
//!
//! [`Manager`] keeps recognizers, relations, and subscriptions, and simulates the part of
//! a recognition pipeline that relations affect. Hosts (and tests) decide *what* was
//! recognized; the manager decides whether and when those events are delivered.
//!
//! ## Input sequences
//!
//! 1) [`Manager::begin_input`] starts a sequence: every recognizer returns to
//!    [`RecognizerState::Possible`].
//! 2) [`Manager::emit`] reports an event from the recognizer whose name is the longest prefix
//!    of the event name. It returns the events that should reach handlers right now.
//!    - An event is dropped if its recognizer is disabled or failed, the sequence was
//!      stopped, or another recognizer already recognized without a
//!      [`RecognizeWith`](Relation::RecognizeWith) relation between the two.
//!    - If a recognizer it [requires to fail](Relation::RequireFailure) already recognized,
//!      the emitter fails instead.
//!    - If one is still undecided, the event is held.
//! 3) [`Manager::fail`] reports that a recognizer failed and returns held events that can now
//!    be delivered.
//!
//! Only events somebody listens to (see [`GestureEngine::on`]) are returned.
//!
//! ```
//! use understory_gesture::engine::{GestureEngine, Relation};
//! use understory_gesture::event::GestureEvent;
//! use understory_gesture::kind::RecognizerKind;
//! use understory_gesture::manager::Manager;
//! use understory_gesture::options::{Factories, RecognizerOptions};
//! use kurbo::Point;
//!
//! let factories = Factories::default();
//! let mut mc = Manager::new();
//! mc.add(factories.build(RecognizerKind::Tap, "tap".into(), &RecognizerOptions::default()));
//! mc.add(factories.build(
//!     RecognizerKind::Tap,
//!     "double-tap".into(),
//!     &RecognizerOptions { taps: Some(2), ..Default::default() },
//! ));
//! assert!(mc.relate("tap", Relation::RequireFailure, "double-tap"));
//! mc.on("tap");
//!
//! mc.begin_input();
//! assert!(mc.emit(GestureEvent::new("tap", Point::ZERO)).is_empty(), "held");
//! let released = mc.fail("double-tap");
//! assert_eq!(released.len(), 1);
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::engine::{GestureEngine, Relation};
use crate::event::GestureEvent;
use crate::kind::RecognizerKind;
use crate::options::{RecognizerConfig, RecognizerSpec};

/// Recognition state within one input sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RecognizerState {
    /// Nothing decided yet.
    Possible,
    /// Recognized, but held until required recognizers fail.
    Waiting,
    /// Recognized and delivering.
    Recognized,
    /// Will not recognize in this sequence.
    Failed,
}

/// A recognizer registered with a [`Manager`].
#[derive(Clone, Debug)]
pub struct Recognizer {
    spec: RecognizerSpec,
    state: RecognizerState,
    recognize_with: Vec<String>,
    require_failure: Vec<String>,
    held: Vec<GestureEvent>,
}

impl Recognizer {
    fn new(spec: RecognizerSpec) -> Self {
        Self {
            spec,
            state: RecognizerState::Possible,
            recognize_with: Vec::new(),
            require_failure: Vec::new(),
            held: Vec::new(),
        }
    }

    /// Lookup name; also the name (or name prefix) of its events.
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Recognizer type.
    pub fn kind(&self) -> RecognizerKind {
        self.spec.kind
    }

    /// Resolved parameters.
    pub fn config(&self) -> &RecognizerConfig {
        &self.spec.config
    }

    /// State in the current input sequence.
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// Recognizers allowed to recognize alongside this one.
    pub fn recognize_with(&self) -> &[String] {
        &self.recognize_with
    }

    /// Recognizers that must fail before this one delivers.
    pub fn require_failure(&self) -> &[String] {
        &self.require_failure
    }

    fn fail(&mut self) {
        self.state = RecognizerState::Failed;
        self.held.clear();
    }
}

/// In-memory gesture engine.
#[derive(Clone, Debug, Default)]
pub struct Manager {
    recognizers: Vec<Recognizer>,
    listening: HashSet<String>,
    stopped: bool,
    destroyed: bool,
}

impl Manager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizers in creation order.
    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }

    /// Look up a recognizer by name.
    pub fn get(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers.iter().find(|r| r.name() == name)
    }

    /// Returns true if the current input sequence was stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Returns true once [`GestureEngine::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Start a new input sequence.
    pub fn begin_input(&mut self) {
        self.stopped = false;
        for r in &mut self.recognizers {
            r.state = RecognizerState::Possible;
            r.held.clear();
        }
    }

    /// Report an event and return the events deliverable now.
    pub fn emit(&mut self, event: GestureEvent) -> Vec<GestureEvent> {
        if self.destroyed || self.stopped {
            return Vec::new();
        }
        let Some(i) = self.emitter_of(&event.name) else {
            log::trace!("no recognizer emits `{}`", event.name);
            return Vec::new();
        };
        let r = &self.recognizers[i];
        if !r.spec.config.enable || r.state == RecognizerState::Failed {
            return Vec::new();
        }
        if r.state == RecognizerState::Waiting {
            self.recognizers[i].held.push(event);
            return Vec::new();
        }
        if self.is_blocked(i) {
            self.recognizers[i].fail();
            return Vec::new();
        }
        let mut waiting = false;
        for base in &r.require_failure {
            match self.state_of(base) {
                Some(RecognizerState::Recognized) => {
                    self.recognizers[i].fail();
                    return Vec::new();
                }
                Some(RecognizerState::Possible | RecognizerState::Waiting) => waiting = true,
                Some(RecognizerState::Failed) | None => {}
            }
        }
        if waiting {
            let r = &mut self.recognizers[i];
            r.state = RecognizerState::Waiting;
            r.held.push(event);
            return Vec::new();
        }
        self.recognize(i);
        self.deliverable(alloc::vec![event])
    }

    /// Report that a recognizer failed and return events released by that failure.
    ///
    /// Failing an unknown or already recognized recognizer does nothing.
    pub fn fail(&mut self, name: &str) -> Vec<GestureEvent> {
        let Some(i) = self.index_of(name) else {
            return Vec::new();
        };
        if self.recognizers[i].state == RecognizerState::Recognized {
            return Vec::new();
        }
        self.recognizers[i].fail();

        let mut out = Vec::new();
        while let Some(j) = self.next_releasable() {
            let held = core::mem::take(&mut self.recognizers[j].held);
            if self.is_blocked(j) {
                self.recognizers[j].fail();
                continue;
            }
            self.recognize(j);
            out.extend(held);
        }
        self.deliverable(out)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.recognizers.iter().position(|r| r.name() == name)
    }

    fn state_of(&self, name: &str) -> Option<RecognizerState> {
        self.get(name).map(Recognizer::state)
    }

    fn emitter_of(&self, event: &str) -> Option<usize> {
        self.recognizers
            .iter()
            .enumerate()
            .filter(|(_, r)| event.starts_with(r.name()))
            .max_by_key(|(_, r)| r.name().len())
            .map(|(i, _)| i)
    }

    // Another recognizer already owns this sequence.
    fn is_blocked(&self, i: usize) -> bool {
        let me = &self.recognizers[i];
        self.recognizers.iter().enumerate().any(|(j, other)| {
            j != i
                && other.state == RecognizerState::Recognized
                && !me.recognize_with.iter().any(|n| n == other.name())
        })
    }

    fn next_releasable(&self) -> Option<usize> {
        self.recognizers.iter().position(|r| {
            r.state == RecognizerState::Waiting
                && r.require_failure.iter().all(|base| {
                    matches!(self.state_of(base), Some(RecognizerState::Failed) | None)
                })
        })
    }

    fn recognize(&mut self, i: usize) {
        self.recognizers[i].state = RecognizerState::Recognized;
        let name = self.recognizers[i].spec.name.clone();
        for r in &mut self.recognizers {
            if r.state != RecognizerState::Recognized && r.require_failure.contains(&name) {
                r.fail();
            }
        }
    }

    fn deliverable(&self, events: Vec<GestureEvent>) -> Vec<GestureEvent> {
        events
            .into_iter()
            .filter(|e| self.listening.contains(e.name.as_str()))
            .collect()
    }
}

impl GestureEngine for Manager {
    fn add(&mut self, recognizer: RecognizerSpec) {
        if self.destroyed || self.index_of(&recognizer.name).is_some() {
            return;
        }
        self.recognizers.push(Recognizer::new(recognizer));
    }

    fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    fn relate(&mut self, target: &str, relation: Relation, base: &str) -> bool {
        let (Some(t), Some(b)) = (self.index_of(target), self.index_of(base)) else {
            return false;
        };
        if t == b {
            return true;
        }
        fn push_unique(list: &mut Vec<String>, name: &str) {
            if !list.iter().any(|n| n == name) {
                list.push(String::from(name));
            }
        }
        match relation {
            Relation::RecognizeWith => {
                push_unique(&mut self.recognizers[t].recognize_with, base);
                push_unique(&mut self.recognizers[b].recognize_with, target);
            }
            Relation::RequireFailure => {
                push_unique(&mut self.recognizers[t].require_failure, base);
            }
        }
        true
    }

    fn on(&mut self, event: &str) {
        if !self.destroyed {
            self.listening.insert(String::from(event));
        }
    }

    fn off(&mut self, event: &str) {
        self.listening.remove(event);
    }

    fn is_listening(&self, event: &str) -> bool {
        self.listening.contains(event)
    }

    fn stop(&mut self, force: bool) {
        self.stopped = true;
        for r in &mut self.recognizers {
            if force || r.state == RecognizerState::Waiting {
                r.held.clear();
            }
        }
    }

    fn destroy(&mut self) {
        self.recognizers.clear();
        self.listening.clear();
        self.destroyed = true;
    }
}
