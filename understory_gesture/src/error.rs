// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors for calls that indicate a programming mistake.
//!
//! Lookups that simply find nothing (unknown gesture names, missing recognizers, events
//! without a target) are not errors; they are logged and dropped.

use core::fmt;

/// Error returned by router operations that cannot proceed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The router was torn down with [`Router::destroy`](crate::router::Router::destroy).
    Destroyed,
    /// A relation name other than `recognizeWith` or `requireFailure`.
    UnknownRelation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed => f.write_str("gesture router used after destroy"),
            Self::UnknownRelation => {
                f.write_str("unknown relation, expected `recognizeWith` or `requireFailure`")
            }
        }
    }
}

impl core::error::Error for Error {}
