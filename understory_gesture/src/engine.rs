// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture-engine boundary.
//!
//! The router never recognizes gestures itself. It creates recognizers in an engine,
//! relates them, subscribes to their event names, and is fed the events the engine emits
//! through [`Router::handle`](crate::router::Router::handle).
//!
//! [`Manager`](crate::manager::Manager) is an in-memory implementation suitable for tests and
//! for hosts that drive recognition elsewhere.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::options::RecognizerSpec;

/// Constraint between two recognizers.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
    /// Both recognizers may recognize during the same input sequence.
    RecognizeWith,
    /// The target may only recognize once the base recognizer has failed.
    RequireFailure,
}

impl Relation {
    /// Name as used by gesture engines (`"recognizeWith"`, `"requireFailure"`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::RecognizeWith => "recognizeWith",
            Self::RequireFailure => "requireFailure",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recognizeWith" => Ok(Self::RecognizeWith),
            "requireFailure" => Ok(Self::RequireFailure),
            _ => Err(Error::UnknownRelation),
        }
    }
}

/// Operations the router needs from a gesture engine.
///
/// Recognizers are addressed by the name in their [`RecognizerSpec`]; event subscriptions
/// by event name. All lookups are silent: missing names are reported through `bool`
/// returns, never panics.
pub trait GestureEngine {
    /// Register a recognizer. Adding a name that already exists replaces nothing and is ignored.
    fn add(&mut self, recognizer: RecognizerSpec);

    /// Returns true if a recognizer with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// Apply `relation` to the `target` recognizer with respect to `base`.
    ///
    /// Returns false, changing nothing, if either recognizer is missing.
    fn relate(&mut self, target: &str, relation: Relation, base: &str) -> bool;

    /// Start delivering events with this name.
    fn on(&mut self, event: &str);

    /// Stop delivering events with this name.
    fn off(&mut self, event: &str);

    /// Returns true if events with this name are delivered.
    fn is_listening(&self, event: &str) -> bool;

    /// Abort recognition for the current input sequence.
    fn stop(&mut self, force: bool);

    /// Tear down every recognizer and subscription.
    fn destroy(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn relation_names_round_trip_through_parsing() {
        for r in [Relation::RecognizeWith, Relation::RequireFailure] {
            assert_eq!(r.to_string().parse::<Relation>(), Ok(r));
        }
        assert_eq!("requirefailure".parse::<Relation>(), Err(Error::UnknownRelation));
    }
}
