// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer options, resolved configurations, and the per-kind factory map.
//!
//! [`RecognizerOptions`] holds caller overrides; every field is optional.
//! A [`Factories`] table turns overrides into a complete [`RecognizerConfig`] for one
//! [`RecognizerKind`], starting from that kind's defaults.
//!
//! ```
//! use understory_gesture::kind::RecognizerKind;
//! use understory_gesture::options::{Factories, RecognizerOptions};
//!
//! let factories = Factories::default();
//! let spec = factories.build(
//!     RecognizerKind::Tap,
//!     "double-tap".into(),
//!     &RecognizerOptions { taps: Some(2), ..Default::default() },
//! );
//! assert_eq!(spec.config.taps, 2);
//! assert_eq!(spec.config.interval, 300);
//! ```

use alloc::string::String;

use crate::kind::RecognizerKind;

bitflags::bitflags! {
    /// Gesture directions a recognizer reacts to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Direction: u8 {
        /// Towards negative x.
        const LEFT = 0b0000_0001;
        /// Towards positive x.
        const RIGHT = 0b0000_0010;
        /// Towards negative y.
        const UP = 0b0000_0100;
        /// Towards positive y.
        const DOWN = 0b0000_1000;
        /// Left or right.
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        /// Up or down.
        const VERTICAL = Self::UP.bits() | Self::DOWN.bits();
        /// Any direction.
        const ALL = Self::HORIZONTAL.bits() | Self::VERTICAL.bits();
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::ALL
    }
}

/// Caller-supplied overrides for a recognizer.
///
/// Unset fields keep the kind's defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognizerOptions {
    /// Whether the recognizer participates at all.
    pub enable: Option<bool>,
    /// Required number of pointers.
    pub pointers: Option<u32>,
    /// Minimal movement (px), scale delta, or rotation (degrees) before recognition.
    pub threshold: Option<f64>,
    /// Accepted directions.
    pub direction: Option<Direction>,
    /// Number of consecutive taps.
    pub taps: Option<u32>,
    /// Maximum time (ms) between consecutive taps.
    pub interval: Option<u32>,
    /// Maximum press time (ms) for a tap, minimum for a press.
    pub time: Option<u32>,
    /// Maximum distance (px) between consecutive taps.
    pub pos_threshold: Option<f64>,
    /// Minimal velocity (px/ms) for a swipe.
    pub velocity: Option<f64>,
}

/// Fully resolved recognizer parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Whether the recognizer participates at all.
    pub enable: bool,
    /// Required number of pointers.
    pub pointers: u32,
    /// Minimal movement (px), scale delta, or rotation (degrees) before recognition.
    pub threshold: f64,
    /// Accepted directions.
    pub direction: Direction,
    /// Number of consecutive taps.
    pub taps: u32,
    /// Maximum time (ms) between consecutive taps.
    pub interval: u32,
    /// Maximum press time (ms) for a tap, minimum for a press.
    pub time: u32,
    /// Maximum distance (px) between consecutive taps.
    pub pos_threshold: f64,
    /// Minimal velocity (px/ms) for a swipe.
    pub velocity: f64,
}

impl RecognizerConfig {
    /// Defaults for a recognizer kind.
    pub fn defaults(kind: RecognizerKind) -> Self {
        let base = Self {
            enable: true,
            pointers: 1,
            threshold: 0.0,
            direction: Direction::ALL,
            taps: 1,
            interval: 300,
            time: 250,
            pos_threshold: 10.0,
            velocity: 0.3,
        };
        match kind {
            RecognizerKind::Pan => Self {
                threshold: 10.0,
                ..base
            },
            RecognizerKind::Pinch | RecognizerKind::Rotate => Self {
                pointers: 2,
                ..base
            },
            RecognizerKind::Press => Self {
                time: 251,
                threshold: 9.0,
                ..base
            },
            RecognizerKind::Swipe => Self {
                threshold: 10.0,
                ..base
            },
            RecognizerKind::Tap => Self {
                threshold: 9.0,
                ..base
            },
        }
    }

    /// Apply overrides on top of `self`.
    #[must_use]
    pub fn with_overrides(self, o: &RecognizerOptions) -> Self {
        Self {
            enable: o.enable.unwrap_or(self.enable),
            pointers: o.pointers.unwrap_or(self.pointers),
            threshold: o.threshold.unwrap_or(self.threshold),
            direction: o.direction.unwrap_or(self.direction),
            taps: o.taps.unwrap_or(self.taps),
            interval: o.interval.unwrap_or(self.interval),
            time: o.time.unwrap_or(self.time),
            pos_threshold: o.pos_threshold.unwrap_or(self.pos_threshold),
            velocity: o.velocity.unwrap_or(self.velocity),
        }
    }
}

/// A recognizer ready to be handed to a [`GestureEngine`](crate::engine::GestureEngine).
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizerSpec {
    /// Recognizer type.
    pub kind: RecognizerKind,
    /// Lookup name, also the name its events are emitted under.
    pub name: String,
    /// Resolved parameters.
    pub config: RecognizerConfig,
}

/// Builds a recognizer configuration for one kind from caller overrides.
pub type Factory = fn(RecognizerKind, &RecognizerOptions) -> RecognizerConfig;

/// Kind defaults, then overrides.
pub fn default_factory(kind: RecognizerKind, options: &RecognizerOptions) -> RecognizerConfig {
    RecognizerConfig::defaults(kind).with_overrides(options)
}

/// Factory map keyed by [`RecognizerKind`].
///
/// Injected into the [router](crate::router::Router) with
/// [`Router::set_factories`](crate::router::Router::set_factories).
#[derive(Copy, Clone)]
pub struct Factories {
    table: [Factory; RecognizerKind::COUNT],
}

impl Default for Factories {
    fn default() -> Self {
        Self {
            table: [default_factory as Factory; RecognizerKind::COUNT],
        }
    }
}

impl core::fmt::Debug for Factories {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Factories").finish_non_exhaustive()
    }
}

impl Factories {
    /// Replace the factory for one kind.
    pub fn set(&mut self, kind: RecognizerKind, factory: Factory) {
        self.table[kind.index()] = factory;
    }

    /// Replace the factory for one kind, builder style.
    #[must_use]
    pub fn with(mut self, kind: RecognizerKind, factory: Factory) -> Self {
        self.set(kind, factory);
        self
    }

    /// Build a recognizer spec.
    pub fn build(
        &self,
        kind: RecognizerKind,
        name: String,
        options: &RecognizerOptions,
    ) -> RecognizerSpec {
        RecognizerSpec {
            kind,
            name,
            config: (self.table[kind.index()])(kind, options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_kind_defaults() {
        let pan = RecognizerConfig::defaults(RecognizerKind::Pan);
        assert_eq!((pan.pointers, pan.threshold), (1, 10.0));
        assert_eq!(pan.direction, Direction::ALL);

        let pinch = RecognizerConfig::defaults(RecognizerKind::Pinch);
        assert_eq!((pinch.pointers, pinch.threshold), (2, 0.0));

        let press = RecognizerConfig::defaults(RecognizerKind::Press);
        assert_eq!((press.time, press.threshold), (251, 9.0));

        let tap = RecognizerConfig::defaults(RecognizerKind::Tap);
        assert_eq!((tap.taps, tap.interval, tap.time), (1, 300, 250));
        assert_eq!(tap.pos_threshold, 10.0);

        let swipe = RecognizerConfig::defaults(RecognizerKind::Swipe);
        assert_eq!(swipe.velocity, 0.3);
        assert!(swipe.enable);
    }

    #[test]
    fn overrides_only_touch_set_fields() {
        let o = RecognizerOptions {
            pointers: Some(2),
            direction: Some(Direction::HORIZONTAL),
            ..Default::default()
        };
        let c = RecognizerConfig::defaults(RecognizerKind::Pan).with_overrides(&o);
        assert_eq!(c.pointers, 2);
        assert_eq!(c.direction, Direction::LEFT | Direction::RIGHT);
        assert_eq!(c.threshold, 10.0);
    }

    #[test]
    fn injected_factory_replaces_one_kind() {
        fn sticky_tap(kind: RecognizerKind, o: &RecognizerOptions) -> RecognizerConfig {
            RecognizerConfig {
                interval: 500,
                ..default_factory(kind, o)
            }
        }
        let f = Factories::default().with(RecognizerKind::Tap, sticky_tap);
        let tap = f.build(RecognizerKind::Tap, "tap".into(), &RecognizerOptions::default());
        assert_eq!(tap.config.interval, 500);
        assert_eq!(tap.name, "tap");
        let pan = f.build(RecognizerKind::Pan, "pan".into(), &RecognizerOptions::default());
        assert_eq!(pan.config, RecognizerConfig::defaults(RecognizerKind::Pan));
    }
}
