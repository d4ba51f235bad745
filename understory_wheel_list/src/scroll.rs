// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll integration: turning raw deltas into anchor updates.

use tracing::debug;

use crate::{ItemPool, ScrollHost, ScrollPhase, ScrollState, WheelList};

impl<H> WheelList<H> {
    /// Scrolls the content by `dy` pixels (positive moves content up) and re-fills.
    ///
    /// `dy` is clamped to `±max_scroll_step` first. The return value is the delta
    /// that was consumed; whatever is left of `dy` is for the host's overscroll
    /// handling:
    /// - `0` when the wheel is detached or nothing is materialized,
    /// - `0` when the scroll ran into the head or tail of the list, or would have
    ///   lifted the last item off the viewport bottom, and the window was snapped to
    ///   that boundary,
    /// - the clamped `dy` otherwise.
    pub fn on_scroll_by<P, S>(&mut self, dy: i32, pool: &mut P, host: &mut S) -> i32
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        let Some(viewport_height) = self.viewport.map(|v| v.height) else {
            return 0;
        };
        if self.window.is_empty() {
            return 0;
        }
        let step = self.config.max_scroll_step;
        let dy = dy.clamp(-step, step);
        if dy != 0 {
            self.phase = ScrollPhase::Dragging;
        }

        if dy > 0
            && self
                .tail_bottom_within(viewport_height + dy, pool)
                .is_some_and(|bottom| bottom - dy < viewport_height)
        {
            return self.snap_to_tail(viewport_height, pool, host);
        }

        self.anchor.top_of_first_child -= dy;
        if !self.normalize_anchor(pool) {
            debug!(dy, "scroll clamped at the head");
            self.fill(0, pool, host);
            return 0;
        }
        self.fill(self.anchor.start_index, pool, host);
        dy
    }

    /// Ends a gesture or animation and settles the nearest item if auto-stabilization
    /// is enabled. Returns the requested settle displacement, if any.
    pub fn on_scroll_state_idle<P, S>(&mut self, pool: &mut P, host: &mut S) -> Option<i32>
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        self.phase = ScrollPhase::Idle;
        if self.config.auto_stabilize {
            self.stabilize(pool, host)
        } else {
            None
        }
    }

    fn snap_to_tail<P, S>(&mut self, viewport_height: i32, pool: &mut P, host: &mut S) -> i32
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        self.anchor = self.tail_anchor(viewport_height, pool);
        debug!(
            start = self.anchor.start_index,
            top = self.anchor.top_of_first_child,
            "scroll snapped to the tail"
        );
        self.fill(self.anchor.start_index, pool, host);
        0
    }

    /// Bottom of the last item, if it lies above `limit`.
    ///
    /// Measured from the window's tail; items past it may be hidden because they are
    /// off the curve, so their extents come from the pool.
    fn tail_bottom_within<P>(&self, limit: i32, pool: &mut P) -> Option<i32>
    where
        P: ItemPool<Handle = H>,
    {
        let last = self.window.last()?;
        let len = pool.len();
        let mut index = last.index;
        let mut bottom = last.bottom;
        while index + 1 < len {
            if bottom >= limit {
                return None;
            }
            index += 1;
            bottom += pool.extent_of(index);
        }
        Some(bottom)
    }

    /// Anchor that puts the bottom of the last item on the viewport bottom.
    ///
    /// Falls back to the head of the list when all items together are shorter than
    /// the viewport.
    fn tail_anchor<P>(&self, viewport_height: i32, pool: &mut P) -> ScrollState
    where
        P: ItemPool<Handle = H>,
    {
        let mut position = viewport_height;
        let mut index = pool.len();
        while index > 0 {
            index -= 1;
            position -= self.extent(index, pool);
            if position <= 0 {
                return ScrollState {
                    start_index: index,
                    top_of_first_child: position,
                };
            }
        }
        ScrollState::default()
    }

    /// Moves the anchor by whole items until its offset lies in `(-height, 0]` of
    /// its item, clamping `start_index` to the last item. An offset past the end of
    /// the list becomes the tail anchor.
    ///
    /// Returns `false` if the offset reached above the head of the list, in which
    /// case the anchor is reset to the top.
    pub(crate) fn normalize_anchor<P>(&mut self, pool: &mut P) -> bool
    where
        P: ItemPool<Handle = H>,
    {
        let len = pool.len();
        if len == 0 {
            self.anchor = ScrollState::default();
            return true;
        }
        let mut start = self.anchor.start_index.min(len - 1);
        let mut top = self.anchor.top_of_first_child;
        while top > 0 {
            if start == 0 {
                self.anchor = ScrollState::default();
                return false;
            }
            start -= 1;
            top -= self.extent(start, pool);
        }
        while start + 1 < len {
            let height = self.extent(start, pool);
            if top > -height {
                break;
            }
            top += height;
            start += 1;
        }
        if top <= -self.extent(start, pool) {
            // Even the last item is above the viewport: pin it to the bottom instead.
            let viewport_height = self.viewport.map_or(0, |v| v.height);
            self.anchor = self.tail_anchor(viewport_height, pool);
            return true;
        }
        self.anchor = ScrollState {
            start_index: start,
            top_of_first_child: top,
        };
        true
    }

    /// Height of `index`, from the window when materialized.
    pub(crate) fn extent<P>(&self, index: usize, pool: &mut P) -> i32
    where
        P: ItemPool<Handle = H>,
    {
        match self.window.find(index) {
            Some(item) => item.height(),
            None => pool.extent_of(index),
        }
    }
}
