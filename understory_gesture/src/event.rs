// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture events and the viewport → scene coordinate normalizer.

use alloc::string::String;
use kurbo::{Point, Rect, Vec2};

use crate::options::Direction;

/// A recognized gesture sample, as emitted by a gesture engine.
///
/// `center` is in viewport space when emitted and in root scene space once normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEvent {
    /// Event type name, e.g. `"panmove"` or `"zoomPan-panmove"`.
    pub name: String,
    /// Center of the pointers involved.
    pub center: Point,
    /// First sample of the gesture.
    pub is_first: bool,
    /// Last sample of the gesture.
    pub is_final: bool,
    /// Movement since the first sample.
    pub delta: Vec2,
    /// Scale relative to the first sample (pinch), `1.0` otherwise.
    pub scale: f64,
    /// Rotation in degrees relative to the first sample (rotate).
    pub rotation: f64,
    /// Velocity in px/ms.
    pub velocity: Vec2,
    /// Dominant direction of movement.
    pub direction: Direction,
    /// Number of pointers.
    pub pointers: u32,
    /// Consecutive tap count (tap).
    pub tap_count: u32,
    /// Engine timestamp in milliseconds.
    pub time_stamp: u64,
}

impl GestureEvent {
    /// A single-sample event (both first and final) at `center`.
    pub fn new(name: impl Into<String>, center: Point) -> Self {
        Self {
            name: name.into(),
            center,
            is_first: true,
            is_final: true,
            delta: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            direction: Direction::empty(),
            pointers: 1,
            tap_count: 0,
            time_stamp: 0,
        }
    }

    /// Set the phase flags.
    #[must_use]
    pub fn with_phase(mut self, is_first: bool, is_final: bool) -> Self {
        self.is_first = is_first;
        self.is_final = is_final;
        self
    }
}

/// Converts viewport-space points to root scene space.
///
/// The offset is the origin of the hosting surface in the viewport. It is cached at
/// construction and refreshed explicitly with [`Normalizer::recache`].
///
/// Normalization never mutates the caller's event: [`Normalizer::normalize`] returns a copy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Normalizer {
    offset: Vec2,
}

impl Normalizer {
    /// Normalizer for a surface whose origin sits at `origin` in the viewport.
    pub fn new(origin: Point) -> Self {
        Self {
            offset: origin.to_vec2(),
        }
    }

    /// Normalizer for a surface with the given viewport bounding rectangle.
    pub fn from_bounds(bounds: Rect) -> Self {
        Self::new(bounds.origin())
    }

    /// Refresh the cached offset, e.g. after the surface moved or resized.
    pub fn recache(&mut self, bounds: Rect) {
        self.offset = bounds.origin().to_vec2();
    }

    /// The cached offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Map a viewport point to scene space. Non-numeric results collapse to `0`.
    pub fn normalize_point(&self, pt: Point) -> Point {
        let p = pt - self.offset;
        Point::new(
            if p.x.is_nan() { 0.0 } else { p.x },
            if p.y.is_nan() { 0.0 } else { p.y },
        )
    }

    /// Copy of `event` with its center in scene space.
    pub fn normalize(&self, event: &GestureEvent) -> GestureEvent {
        GestureEvent {
            center: self.normalize_point(event.center),
            ..event.clone()
        }
    }
}
