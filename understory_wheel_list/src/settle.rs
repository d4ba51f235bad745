// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settling the item nearest the vertical center.

use tracing::debug;

use crate::{ItemPool, ScrollHost, WheelList};

impl<H> WheelList<H> {
    /// Requests a smooth scroll that brings the item nearest the vertical center to
    /// dead center, returning the requested displacement.
    ///
    /// Items are laid out monotonically, so the scan stops at the first item that is
    /// not closer than its predecessor. An item that cannot reach the center without
    /// scrolling past the head or tail of the list is replaced by its neighbour on
    /// the other side of the center.
    ///
    /// Returns `None` (and requests nothing) when the nearest item is already
    /// centered, nothing is materialized, the wheel is detached, or `host` is still
    /// animating a previous request.
    pub fn stabilize<P, S>(&mut self, pool: &mut P, host: &mut S) -> Option<i32>
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        let viewport = self.viewport?;
        if host.is_smooth_scrolling() {
            return None;
        }
        let vc = viewport.vertical_center;

        let mut nearest = *self.window.first()?;
        for item in self.window.iter().skip(1) {
            if (item.mid_y() - vc).unsigned_abs() >= (nearest.mid_y() - vc).unsigned_abs() {
                break;
            }
            nearest = *item;
        }
        let distance = nearest.mid_y() - vc;
        if distance == 0 {
            return None;
        }

        let len = pool.len();
        let target_mid = if distance < 0 {
            if self.reaches_from_above(nearest.index, vc, pool) {
                nearest.mid_y()
            } else if nearest.index + 1 < len
                && self.reaches_from_below(nearest.index + 1, viewport.height - vc, pool)
            {
                let height = self.extent(nearest.index + 1, pool);
                nearest.bottom + height / 2
            } else {
                return None;
            }
        } else if self.reaches_from_below(nearest.index, viewport.height - vc, pool) {
            nearest.mid_y()
        } else if nearest.index > 0 && self.reaches_from_above(nearest.index - 1, vc, pool) {
            let height = self.extent(nearest.index - 1, pool);
            nearest.top - height + height / 2
        } else {
            return None;
        };

        let dy = target_mid - vc;
        if dy == 0 {
            return None;
        }
        debug!(index = nearest.index, dy, "settling");
        host.smooth_scroll_by(dy);
        Some(dy)
    }

    /// Whether there is at least `room` of content above the middle of `index`.
    fn reaches_from_above<P>(&self, index: usize, room: i32, pool: &mut P) -> bool
    where
        P: ItemPool<Handle = H>,
    {
        let mut gap = room;
        for i in 0..index {
            gap -= self.extent(i, pool);
            if gap <= 0 {
                return true;
            }
        }
        gap - self.extent(index, pool) / 2 <= 0
    }

    /// Whether there is at least `room` of content below the middle of `index`.
    fn reaches_from_below<P>(&self, index: usize, room: i32, pool: &mut P) -> bool
    where
        P: ItemPool<Handle = H>,
    {
        let mut gap = room;
        for i in (index + 1..pool.len()).rev() {
            gap -= self.extent(i, pool);
            if gap <= 0 {
                return true;
            }
        }
        gap - self.extent(index, pool) / 2 <= 0
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use crate::model::testing::{RecordingHost, RecordingPool};
    use crate::{CurveShape, ScrollState, WheelConfig, WheelList};

    fn wheel() -> WheelList<usize> {
        let config = WheelConfig::new(CurveShape::circle(500.0, 50.0)).with_auto_stabilize(false);
        let mut wheel = WheelList::new(&config).unwrap();
        wheel.on_attach(Rect::new(0.0, 0.0, 600.0, 400.0));
        wheel
    }

    #[test]
    fn settles_the_nearest_reachable_item() {
        let mut wheel = wheel();
        let mut pool = RecordingPool::uniform(10, 100, 200);
        let mut host = RecordingHost::default();
        wheel.on_layout(&mut pool, &mut host);

        // Item 1 (middle 150) is nearest but has only 150px above its middle,
        // so item 2 (middle 250) is settled instead.
        assert_eq!(wheel.stabilize(&mut pool, &mut host), Some(50));
        assert_eq!(host.requests, [50]);

        // Play the animation back and settle again: nothing left to do.
        wheel.on_scroll_by(50, &mut pool, &mut host);
        let centered = wheel.window().find(2).copied().unwrap();
        assert_eq!(centered.mid_y(), 200);
        assert_eq!(wheel.stabilize(&mut pool, &mut host), None);
        assert_eq!(host.requests, [50]);
    }

    #[test]
    fn settles_upward_when_the_nearest_item_is_above_center() {
        let mut wheel = wheel();
        let mut pool = RecordingPool::uniform(10, 100, 200);
        let mut host = RecordingHost::default();
        wheel.restore_scroll_state(ScrollState {
            start_index: 2,
            top_of_first_child: -30,
        });
        wheel.on_layout(&mut pool, &mut host);
        // Items 2..6 at -30, 70, 170, 270, 370; item 4 has its middle at 220.
        assert_eq!(wheel.stabilize(&mut pool, &mut host), Some(20));

        wheel.restore_scroll_state(ScrollState {
            start_index: 2,
            top_of_first_child: -80,
        });
        wheel.on_layout(&mut pool, &mut host);
        // Item 4 now spans 120..220 with its middle 30px above the center.
        assert_eq!(wheel.stabilize(&mut pool, &mut host), Some(-30));
    }

    #[test]
    fn falls_back_to_the_previous_item_near_the_tail() {
        let mut wheel = wheel();
        let mut pool = RecordingPool::uniform(10, 100, 200);
        let mut host = RecordingHost::default();
        wheel.restore_scroll_state(ScrollState {
            start_index: 6,
            top_of_first_child: -20,
        });
        wheel.on_layout(&mut pool, &mut host);
        // Items 6..9 at -20, 80, 180, 280. Item 8 (middle 230) has only 150px below
        // its middle, so item 7 (middle 130) is settled instead.
        assert_eq!(wheel.stabilize(&mut pool, &mut host), Some(-70));
    }

    #[test]
    fn nothing_to_settle() {
        let mut wheel = wheel();
        let mut pool = RecordingPool::uniform(3, 100, 200);
        let mut host = RecordingHost::default();
        wheel.on_layout(&mut pool, &mut host);
        // Three items in a 400px viewport cannot be centered in either direction.
        assert_eq!(wheel.stabilize(&mut pool, &mut host), None);

        let mut empty = RecordingPool::uniform(0, 100, 200);
        wheel.on_data_set_changed(&mut pool);
        wheel.on_layout(&mut empty, &mut host);
        assert_eq!(wheel.stabilize(&mut empty, &mut host), None);
        assert!(host.requests.is_empty());
    }

    #[test]
    fn waits_for_a_running_animation() {
        let mut wheel = wheel();
        let mut pool = RecordingPool::uniform(10, 100, 200);
        let mut host = RecordingHost {
            animating: true,
            ..RecordingHost::default()
        };
        wheel.on_layout(&mut pool, &mut host);
        assert_eq!(wheel.stabilize(&mut pool, &mut host), None);
        host.animating = false;
        assert_eq!(wheel.stabilize(&mut pool, &mut host), Some(50));
    }
}
