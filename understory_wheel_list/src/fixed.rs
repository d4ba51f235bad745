// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple item pool with uniform per-item size.

use crate::{ItemPool, MeasuredItem};

/// An [`ItemPool`] where all items share the same decorated size.
///
/// Handles are the item indices themselves. The pool keeps counters of how many
/// elements are live and how many were ever acquired, which is enough for hosts
/// that draw rows directly from the returned geometry.
#[derive(Debug, Clone, Copy)]
pub struct FixedItemPool {
    len: usize,
    width: i32,
    height: i32,
    live: usize,
    acquired: usize,
}

impl FixedItemPool {
    /// Creates a pool of `len` items of the given decorated size.
    ///
    /// Negative sizes are clamped to `0`.
    #[must_use]
    pub fn new(len: usize, width: i32, height: i32) -> Self {
        Self {
            len,
            width: width.max(0),
            height: height.max(0),
            live: 0,
            acquired: 0,
        }
    }

    /// Sets the number of items in the data source.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Sets the uniform decorated size for all items.
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
    }

    /// Returns the uniform decorated height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of handles currently handed out and not yet recycled.
    #[must_use]
    pub const fn live(&self) -> usize {
        self.live
    }

    /// Number of `acquire` calls since creation.
    #[must_use]
    pub const fn acquired(&self) -> usize {
        self.acquired
    }
}

impl ItemPool for FixedItemPool {
    type Handle = usize;

    fn len(&self) -> usize {
        self.len
    }

    fn acquire(&mut self, index: usize) -> MeasuredItem<usize> {
        debug_assert!(index < self.len, "acquire({index}) past len {}", self.len);
        self.live += 1;
        self.acquired += 1;
        MeasuredItem::new(index, self.width, self.height)
    }

    fn recycle(&mut self, _handle: usize) {
        debug_assert!(self.live > 0, "recycled more handles than were acquired");
        self.live = self.live.saturating_sub(1);
    }

    fn extent_of(&mut self, _index: usize) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::FixedItemPool;
    use crate::ItemPool;

    #[test]
    fn acquire_and_recycle_balance() {
        let mut pool = FixedItemPool::new(5, 80, 20);
        let a = pool.acquire(0);
        let b = pool.acquire(4);
        assert_eq!((a.width, a.height), (80, 20));
        assert_eq!(b.handle, 4);
        assert_eq!(pool.live(), 2);
        pool.recycle(a.handle);
        assert_eq!(pool.live(), 1);
        assert_eq!(pool.acquired(), 2);
    }

    #[test]
    fn extent_of_does_not_materialize() {
        let mut pool = FixedItemPool::new(3, 10, 30);
        assert_eq!(pool.extent_of(2), 30);
        assert_eq!(pool.acquired(), 0);
    }

    #[test]
    fn negative_sizes_are_clamped_to_zero() {
        let mut pool = FixedItemPool::new(3, -5, -5);
        assert_eq!(pool.height(), 0);
        pool.set_size(10, -1);
        assert_eq!(pool.height(), 0);
    }
}
