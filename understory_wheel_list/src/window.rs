// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The run of currently materialized items.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::ItemPool;

/// Inline capacity of an [`ItemWindow`]; wheels rarely show more rows than this.
const INLINE_ITEMS: usize = 8;

/// Placement of one materialized item, in viewport pixels.
///
/// Hosts apply this to their own display element: translate it to
/// `(left, top)` and scale it by `scale` around [`Item::pivot`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Item {
    /// Index into the data source.
    pub index: usize,
    /// Top edge of the decorated bounds.
    pub top: i32,
    /// Bottom edge of the decorated bounds; always `> top` for non-empty items.
    pub bottom: i32,
    /// Left edge of the decorated bounds, derived from the curve.
    pub left: i32,
    /// Decorated width.
    pub width: i32,
    /// Decoration inset at the top of `top..bottom`.
    pub decoration_top: i32,
    /// Decoration inset at the bottom of `top..bottom`.
    pub decoration_bottom: i32,
    /// Depth scale in `[0, 1]`.
    pub scale: f64,
}

impl Item {
    /// Decorated height.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Vertical middle, rounded toward zero.
    #[must_use]
    pub const fn mid_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    /// Decorated bounds.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.left) + f64::from(self.width),
            f64::from(self.bottom),
        )
    }

    /// Point the scale is applied around: the left edge at the vertical middle.
    #[must_use]
    pub fn pivot(&self) -> Point {
        Point::new(
            f64::from(self.left),
            f64::from(self.top) + f64::from(self.height()) / 2.0,
        )
    }
}

#[derive(Debug)]
struct Slot<H> {
    handle: H,
    item: Item,
}

/// Ordered run of materialized items together with the handles that display them.
///
/// Invariants, checked in debug builds on every append:
/// - indices are contiguous and strictly increasing,
/// - adjacent items touch: `item[i].bottom == item[i + 1].top`.
#[derive(Debug)]
pub struct ItemWindow<H> {
    slots: SmallVec<[Slot<H>; INLINE_ITEMS]>,
}

impl<H> Default for ItemWindow<H> {
    fn default() -> Self {
        Self {
            slots: SmallVec::new(),
        }
    }
}

impl<H> ItemWindow<H> {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of materialized items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing is materialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// First (topmost) item.
    #[must_use]
    pub fn first(&self) -> Option<&Item> {
        self.slots.first().map(|s| &s.item)
    }

    /// Last (bottommost) item.
    #[must_use]
    pub fn last(&self) -> Option<&Item> {
        self.slots.last().map(|s| &s.item)
    }

    /// Item at position `pos` within the window (not a data-source index).
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<&Item> {
        self.slots.get(pos).map(|s| &s.item)
    }

    /// Item for data-source index `index`, if materialized.
    #[must_use]
    pub fn find(&self, index: usize) -> Option<&Item> {
        let first = self.first()?.index;
        self.get(index.checked_sub(first)?)
    }

    /// Items in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Item> + ExactSizeIterator {
        self.slots.iter().map(|s| &s.item)
    }

    /// Items paired with their display handles, in index order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (&H, &Item)> + ExactSizeIterator {
        self.slots.iter().map(|s| (&s.handle, &s.item))
    }

    /// Appends an item at the tail.
    pub(crate) fn push_back(&mut self, handle: H, item: Item) {
        if let Some(last) = self.last() {
            debug_assert_eq!(
                last.index + 1,
                item.index,
                "window indices must be contiguous"
            );
            debug_assert_eq!(last.bottom, item.top, "window items must touch");
        }
        self.slots.push(Slot { handle, item });
    }

    /// Evicts the head item.
    pub(crate) fn pop_front(&mut self) -> Option<(H, Item)> {
        if self.slots.is_empty() {
            return None;
        }
        let slot = self.slots.remove(0);
        Some((slot.handle, slot.item))
    }

    /// Evicts the tail item.
    pub(crate) fn pop_back(&mut self) -> Option<(H, Item)> {
        self.slots.pop().map(|slot| (slot.handle, slot.item))
    }

    /// Evicts the head item if it shows data-source index `index`.
    pub(crate) fn pop_front_if(&mut self, index: usize) -> Option<(H, Item)> {
        if self.first()?.index == index {
            self.pop_front()
        } else {
            None
        }
    }

    /// Evicts head items with an index below `index`, returning their handles to `pool`.
    pub(crate) fn release_before<P>(&mut self, index: usize, pool: &mut P)
    where
        P: ItemPool<Handle = H>,
    {
        while self.first().is_some_and(|item| item.index < index) {
            if let Some((handle, _)) = self.pop_front() {
                pool.recycle(handle);
            }
        }
    }

    /// Evicts every item and returns its handle to `pool`.
    pub(crate) fn release_all<P>(&mut self, pool: &mut P)
    where
        P: ItemPool<Handle = H>,
    {
        while let Some((handle, _)) = self.pop_back() {
            pool.recycle(handle);
        }
    }
}
