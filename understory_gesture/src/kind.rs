// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer vocabulary and event-name resolution.
//!
//! ## Event names
//!
//! An event name is either *plain* (`"pan"`, `"panstart"`, `"tap"`) or *composite*
//! (`"zoomPan-panmove"`): a caller-chosen prefix, a `-`, and a plain gesture name.
//!
//! - The recognizer kind is found by a prefix match of the capitalized base name against
//!   [`RecognizerKind::ALL`]: `"panstart"` → `"Panstart"` starts with `"Pan"`.
//! - The [recognizer name](recognizer_name) is the key under which the recognizer lives in the
//!   gesture engine, and the name its events are emitted under: `"pan"` for every plain pan
//!   phase, `"zoomPan-pan"` for every `zoomPan-` pan phase.
//! - The [options key](options_key) selects stored recognizer options: the prefix for
//!   composite names, the capitalized kind name for plain names.
//!
//! ```
//! use understory_gesture::kind::{RecognizerKind, options_key, recognizer_name, resolve};
//!
//! assert_eq!(resolve("panstart"), Some(RecognizerKind::Pan));
//! assert_eq!(resolve("zoomPan-pinchend"), Some(RecognizerKind::Pinch));
//! assert_eq!(resolve("doubletap"), None);
//!
//! assert_eq!(recognizer_name("panmove").as_deref(), Some("pan"));
//! assert_eq!(recognizer_name("zoomPan-panmove").as_deref(), Some("zoomPan-pan"));
//! assert_eq!(options_key("double-tap").as_deref(), Some("double"));
//! assert_eq!(options_key("tap").as_deref(), Some("Tap"));
//! ```

use alloc::string::String;
use core::fmt;

/// The closed set of gesture recognizer types.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RecognizerKind {
    /// Single or multi-pointer drag.
    Pan,
    /// Two-pointer scale.
    Pinch,
    /// Long press.
    Press,
    /// Two-pointer rotation.
    Rotate,
    /// Fast directional flick.
    Swipe,
    /// Single or repeated tap.
    Tap,
}

impl RecognizerKind {
    /// Number of kinds.
    pub const COUNT: usize = 6;

    /// Every kind, in resolution order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pan,
        Self::Pinch,
        Self::Press,
        Self::Rotate,
        Self::Swipe,
        Self::Tap,
    ];

    /// Capitalized type name, as matched by [`resolve`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pan => "Pan",
            Self::Pinch => "Pinch",
            Self::Press => "Press",
            Self::Rotate => "Rotate",
            Self::Swipe => "Swipe",
            Self::Tap => "Tap",
        }
    }

    /// Lowercase native event name of a recognizer of this kind.
    pub const fn event_name(self) -> &'static str {
        match self {
            Self::Pan => "pan",
            Self::Pinch => "pinch",
            Self::Press => "press",
            Self::Rotate => "rotate",
            Self::Swipe => "swipe",
            Self::Tap => "tap",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if `event` carries a custom prefix (`"prefix-gesture"`).
pub fn is_composite(event: &str) -> bool {
    event.contains('-')
}

/// Custom prefix of a composite name: the text before the first `-`.
pub fn custom_prefix(event: &str) -> Option<&str> {
    event.split_once('-').map(|(prefix, _)| prefix)
}

/// Gesture part of an event name: the text after the last `-`, or the whole name.
pub fn base_name(event: &str) -> &str {
    event.rsplit_once('-').map_or(event, |(_, base)| base)
}

/// Resolve an event name to the recognizer kind that emits it.
///
/// The first character of the base name is upper-cased, then the first kind whose
/// [`name`](RecognizerKind::name) is a prefix of the result is returned.
/// Returns `None` when no kind matches; callers treat such names as inert.
pub fn resolve(event: &str) -> Option<RecognizerKind> {
    let base = base_name(event);
    let mut chars = base.chars();
    let first = chars.next()?;
    let mut candidate = String::with_capacity(base.len());
    candidate.extend(first.to_uppercase());
    candidate.push_str(chars.as_str());
    RecognizerKind::ALL
        .into_iter()
        .find(|kind| candidate.starts_with(kind.name()))
}

/// Canonical recognizer name for an event name, or `None` if it does not resolve.
pub fn recognizer_name(event: &str) -> Option<String> {
    let kind = resolve(event)?;
    Some(recognizer_name_for(event, kind))
}

pub(crate) fn recognizer_name_for(event: &str, kind: RecognizerKind) -> String {
    match custom_prefix(event) {
        Some(prefix) => {
            let mut name = String::with_capacity(prefix.len() + 1 + kind.event_name().len());
            name.push_str(prefix);
            name.push('-');
            name.push_str(kind.event_name());
            name
        }
        None => String::from(kind.event_name()),
    }
}

/// Key under which recognizer options for `event` are stored.
///
/// Composite names use their prefix, so every phase of a composite recognizer shares one
/// configuration. Plain names use the capitalized kind name.
pub fn options_key(event: &str) -> Option<String> {
    match custom_prefix(event) {
        Some(prefix) => Some(String::from(prefix)),
        None => resolve(event).map(|kind| String::from(kind.name())),
    }
}
