// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary input over a ring-shaped touch area.
//!
//! Watch faces and rotary carousels take scroll input from a finger sliding around
//! a ring rather than along an axis. This module turns such gestures into a single
//! signed scroll delta that a vertical list can consume directly.
//!
//! ## Ring hit test
//!
//! A gesture is tracked only if it *starts* strictly inside the annulus between
//! [`WheelRing::inner_radius`] and [`WheelRing::outer_radius`]. Moves and flings of a
//! gesture that started elsewhere are ignored. Taps and long presses anywhere are
//! passed through for hit testing unless click handling is turned off.
//!
//! ## Delta mapping
//!
//! The plane is split into four quadrants by the axes through the ring center. Each
//! quadrant combines the raw `(dx, dy)` with a fixed pair of signs so that moving
//! clockwise produces a positive delta:
//!
//! | quadrant    | delta       |
//! |-------------|-------------|
//! | upper-left  | `dx - dy`   |
//! | upper-right | `dx + dy`   |
//! | lower-right | `-dx + dy`  |
//! | lower-left  | `-dx - dy`  |
//!
//! This approximates the distance travelled along the ring without computing an
//! angle. It is exact on the axes and least accurate on the diagonals.
//!
//! ## Usage
//!
//! ```
//! use kurbo::{Point, Size, Vec2};
//! use understory_event_state::wheel::{WheelGesture, WheelRing};
//!
//! // A 200×200 face with a 70px-thick rotary ring along its edge.
//! let ring = WheelRing::from_bounds(Size::new(200.0, 200.0), 70.0);
//! let mut gesture = WheelGesture::new(ring);
//!
//! assert!(gesture.on_down(Point::new(100.0, 60.0)));
//! // Sliding right along the top of the ring scrolls forward.
//! let delta = gesture.on_scroll(Point::new(110.0, 50.0), Vec2::new(5.0, -3.0));
//! assert_eq!(delta, Some(2.0));
//! assert!(gesture.on_up());
//!
//! // Touches in the middle of the face are not rotary input, but taps still are
//! // reported.
//! let tap = Point::new(100.0, 100.0);
//! assert!(gesture.on_down(tap));
//! assert!(!gesture.is_tracking());
//! assert_eq!(gesture.on_scroll(Point::new(100.0, 90.0), Vec2::new(0.0, 10.0)), None);
//! assert_eq!(gesture.on_single_tap_up(tap), Some(tap));
//! assert!(!gesture.on_up());
//! ```

use kurbo::{Point, Size, Vec2};
use tracing::debug;

/// Ring-shaped touch area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelRing {
    /// Center of the ring.
    pub center: Point,
    /// Radius of the hole; touches at or inside it are rejected.
    pub inner_radius: f64,
    /// Outer radius; touches at or beyond it are rejected.
    pub outer_radius: f64,
}

impl WheelRing {
    /// Creates a ring from explicit radii.
    #[must_use]
    pub const fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
        }
    }

    /// Creates the largest ring that fits centered in `size`, `thickness` wide.
    ///
    /// A thickness larger than the outer radius yields a full disc.
    #[must_use]
    pub fn from_bounds(size: Size, thickness: f64) -> Self {
        let outer_radius = size.width.min(size.height) / 2.0;
        Self {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            inner_radius: (outer_radius - thickness).max(0.0),
            outer_radius,
        }
    }

    /// Returns `true` if `point` lies strictly between the inner and outer circles.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let distance_squared = (point - self.center).hypot2();
        self.inner_radius * self.inner_radius < distance_squared
            && distance_squared < self.outer_radius * self.outer_radius
    }
}

/// Maps a raw two-axis delta at `point` to a signed rotary delta around `center`.
///
/// See the [module documentation](self) for the quadrant table. A point exactly at
/// `center` belongs to no quadrant and maps to `0.0`.
#[must_use]
pub fn quadrant_delta(center: Point, point: Point, delta: Vec2) -> f64 {
    let Vec2 { x: dx, y: dy } = delta;
    let (x, y) = (point.x, point.y);
    let (cx, cy) = (center.x, center.y);
    if x <= cx && y < cy {
        dx - dy
    } else if x > cx && y <= cy {
        dx + dy
    } else if x >= cx && y > cy {
        -dx + dy
    } else if x < cx && y >= cy {
        -dx - dy
    } else {
        0.0
    }
}

/// Gesture state for rotary input over a [`WheelRing`].
///
/// Feed it the host's gesture callbacks; it answers with the scalar delta to apply
/// to the list, or `None` when the gesture is not rotary input.
#[derive(Clone, Debug)]
pub struct WheelGesture {
    ring: WheelRing,
    handle_clicks: bool,
    touch_in_ring: bool,
}

impl WheelGesture {
    /// Creates gesture state for `ring` with click handling enabled.
    #[must_use]
    pub const fn new(ring: WheelRing) -> Self {
        Self {
            ring,
            handle_clicks: true,
            touch_in_ring: false,
        }
    }

    /// Enables or disables reporting taps and long presses.
    ///
    /// With click handling off, gestures starting outside the ring are declined in
    /// [`on_down`](Self::on_down).
    #[must_use]
    pub const fn with_click_handling(mut self, handle_clicks: bool) -> Self {
        self.handle_clicks = handle_clicks;
        self
    }

    /// The ring gestures are tested against.
    #[must_use]
    pub const fn ring(&self) -> WheelRing {
        self.ring
    }

    /// Replaces the ring, typically after the host was resized.
    pub fn set_ring(&mut self, ring: WheelRing) {
        self.ring = ring;
    }

    /// Returns `true` if the current gesture started inside the ring.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.touch_in_ring
    }

    /// Starts a gesture at `point`.
    ///
    /// Returns whether the host should keep delivering this gesture: `true` when it
    /// started inside the ring or click handling is enabled.
    pub fn on_down(&mut self, point: Point) -> bool {
        self.touch_in_ring = self.ring.contains(point);
        debug!(x = point.x, y = point.y, in_ring = self.touch_in_ring, "wheel down");
        self.handle_clicks || self.touch_in_ring
    }

    /// Maps a scroll `distance` reported at `point` to a rotary delta.
    ///
    /// `None` when the gesture did not start inside the ring.
    pub fn on_scroll(&self, point: Point, distance: Vec2) -> Option<f64> {
        self.touch_in_ring
            .then(|| quadrant_delta(self.ring.center, point, distance))
    }

    /// Maps a fling `velocity` reported at `point` to a rotary velocity.
    ///
    /// Fling velocities point opposite to scroll distances, so the mapped value is
    /// negated. `None` when the gesture did not start inside the ring.
    pub fn on_fling(&self, point: Point, velocity: Vec2) -> Option<f64> {
        self.touch_in_ring
            .then(|| -quadrant_delta(self.ring.center, point, velocity))
    }

    /// Reports a tap at `point` for hit testing, if click handling is enabled.
    pub fn on_single_tap_up(&self, point: Point) -> Option<Point> {
        self.handle_clicks.then_some(point)
    }

    /// Reports a long press at `point` for hit testing, if click handling is enabled.
    pub fn on_long_press(&self, point: Point) -> Option<Point> {
        self.handle_clicks.then_some(point)
    }

    /// Ends the gesture. Call it for every release, rotary or not.
    ///
    /// Returns `true` if it was rotary input, in which case the host should let the
    /// list settle once any fling finishes.
    pub fn on_up(&mut self) -> bool {
        core::mem::replace(&mut self.touch_in_ring, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> WheelRing {
        WheelRing::new(Point::new(100.0, 100.0), 20.0, 80.0)
    }

    #[test]
    fn ring_hit_test_is_strict() {
        let ring = ring();
        assert!(ring.contains(Point::new(100.0, 60.0)));
        assert!(ring.contains(Point::new(150.0, 100.0)));
        // On the circles themselves.
        assert!(!ring.contains(Point::new(120.0, 100.0)));
        assert!(!ring.contains(Point::new(100.0, 180.0)));
        // Hole and outside.
        assert!(!ring.contains(Point::new(105.0, 105.0)));
        assert!(!ring.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn ring_from_bounds_uses_the_shorter_side() {
        let ring = WheelRing::from_bounds(Size::new(300.0, 200.0), 30.0);
        assert_eq!(ring.center, Point::new(150.0, 100.0));
        assert_eq!(ring.outer_radius, 100.0);
        assert_eq!(ring.inner_radius, 70.0);

        let disc = WheelRing::from_bounds(Size::new(40.0, 40.0), 500.0);
        assert_eq!(disc.inner_radius, 0.0);
        assert!(!disc.contains(disc.center));
        assert!(disc.contains(Point::new(20.0, 10.0)));
    }

    #[test]
    fn upper_right_scroll_adds_components() {
        let mut gesture = WheelGesture::new(ring());
        assert!(gesture.on_down(Point::new(100.0, 60.0)));
        assert!(gesture.is_tracking());
        assert_eq!(
            gesture.on_scroll(Point::new(110.0, 50.0), Vec2::new(5.0, -3.0)),
            Some(2.0)
        );
    }

    #[test]
    fn each_quadrant_has_its_own_signs() {
        let center = Point::new(100.0, 100.0);
        let d = Vec2::new(5.0, 3.0);
        assert_eq!(quadrant_delta(center, Point::new(90.0, 90.0), d), 2.0);
        assert_eq!(quadrant_delta(center, Point::new(110.0, 90.0), d), 8.0);
        assert_eq!(quadrant_delta(center, Point::new(110.0, 110.0), d), -2.0);
        assert_eq!(quadrant_delta(center, Point::new(90.0, 110.0), d), -8.0);
    }

    #[test]
    fn axis_points_fall_into_a_single_quadrant() {
        let center = Point::new(100.0, 100.0);
        let d = Vec2::new(5.0, 3.0);
        // Straight up belongs to the upper-left quadrant.
        assert_eq!(quadrant_delta(center, Point::new(100.0, 50.0), d), 2.0);
        // Straight right belongs to the upper-right quadrant.
        assert_eq!(quadrant_delta(center, Point::new(150.0, 100.0), d), 8.0);
        // Straight down belongs to the lower-right quadrant.
        assert_eq!(quadrant_delta(center, Point::new(100.0, 150.0), d), -2.0);
        // Straight left belongs to the lower-left quadrant.
        assert_eq!(quadrant_delta(center, Point::new(50.0, 100.0), d), -8.0);
        assert_eq!(quadrant_delta(center, center, d), 0.0);
    }

    #[test]
    fn fling_is_negated() {
        let mut gesture = WheelGesture::new(ring());
        gesture.on_down(Point::new(100.0, 60.0));
        assert_eq!(
            gesture.on_fling(Point::new(110.0, 50.0), Vec2::new(500.0, -300.0)),
            Some(-200.0)
        );
    }

    #[test]
    fn gestures_starting_outside_the_ring_are_ignored() {
        let mut gesture = WheelGesture::new(ring()).with_click_handling(false);
        assert!(!gesture.on_down(Point::new(100.0, 100.0)));
        // Even if the finger later moves into the ring.
        assert_eq!(
            gesture.on_scroll(Point::new(100.0, 60.0), Vec2::new(5.0, 5.0)),
            None
        );
        assert_eq!(
            gesture.on_fling(Point::new(100.0, 60.0), Vec2::new(5.0, 5.0)),
            None
        );
        assert!(!gesture.on_up());
    }

    #[test]
    fn click_handling_keeps_the_gesture_but_not_the_scroll() {
        let mut gesture = WheelGesture::new(ring());
        let tap = Point::new(100.0, 100.0);
        assert!(gesture.on_down(tap));
        assert_eq!(gesture.on_scroll(tap, Vec2::new(1.0, 1.0)), None);
        assert_eq!(gesture.on_single_tap_up(tap), Some(tap));
        assert_eq!(gesture.on_long_press(tap), Some(tap));

        let plain = WheelGesture::new(ring()).with_click_handling(false);
        assert_eq!(plain.on_single_tap_up(tap), None);
        assert_eq!(plain.on_long_press(tap), None);
    }

    #[test]
    fn every_release_ends_the_gesture() {
        let mut gesture = WheelGesture::new(ring());
        // A tap in the hole is kept for click handling and released like any other.
        assert!(gesture.on_down(Point::new(100.0, 100.0)));
        assert!(!gesture.on_up());

        gesture.on_down(Point::new(100.0, 60.0));
        assert!(gesture.on_up());
        // Release without a matching down.
        assert!(!gesture.on_up());
        assert!(!gesture.is_tracking());
    }

    #[test]
    fn up_ends_tracking() {
        let mut gesture = WheelGesture::new(ring());
        gesture.on_down(Point::new(100.0, 60.0));
        assert!(gesture.on_up());
        assert!(!gesture.is_tracking());
        assert!(!gesture.on_up());
        assert_eq!(
            gesture.on_scroll(Point::new(110.0, 50.0), Vec2::new(5.0, -3.0)),
            None
        );
    }

    #[test]
    fn set_ring_applies_to_the_next_gesture() {
        let mut gesture = WheelGesture::new(ring()).with_click_handling(false);
        gesture.set_ring(WheelRing::new(Point::ORIGIN, 0.0, 10.0));
        assert!(!gesture.on_down(Point::new(100.0, 60.0)));
        assert!(gesture.on_down(Point::new(3.0, 4.0)));
        assert_eq!(gesture.ring().outer_radius, 10.0);
    }
}
