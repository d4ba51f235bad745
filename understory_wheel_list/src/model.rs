// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host capability traits.

/// A display element handed out by an [`ItemPool`], already measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasuredItem<H> {
    /// Opaque handle to the host's display element.
    pub handle: H,
    /// Decorated width in pixels (margins and decorations included).
    pub width: i32,
    /// Decorated height in pixels (margins and decorations included).
    pub height: i32,
    /// Part of `height` taken by the decoration above the content.
    pub decoration_top: i32,
    /// Part of `height` taken by the decoration below the content.
    pub decoration_bottom: i32,
}

impl<H> MeasuredItem<H> {
    /// An undecorated measurement.
    #[must_use]
    pub const fn new(handle: H, width: i32, height: i32) -> Self {
        Self {
            handle,
            width,
            height,
            decoration_top: 0,
            decoration_bottom: 0,
        }
    }

    /// Sets the top and bottom decoration insets.
    ///
    /// Only consulted with [`WheelConfig::ignore_header_footer_margins`](crate::WheelConfig::ignore_header_footer_margins).
    #[must_use]
    pub fn with_decorations(mut self, top: i32, bottom: i32) -> Self {
        self.decoration_top = top;
        self.decoration_bottom = bottom;
        self
    }
}

/// The host's source of display elements for a dense strip of items indexed `0..len`.
///
/// The wheel never creates or destroys elements itself. During a fill it acquires an
/// element per index it wants to show and releases every element it does not keep
/// before the fill returns.
pub trait ItemPool {
    /// Opaque handle to a display element.
    type Handle;

    /// Number of items in the data source.
    fn len(&self) -> usize;

    /// Returns `true` if the data source has no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materializes (or reuses) and measures an element for `index`.
    ///
    /// Callers only pass indices in `0..len()`.
    fn acquire(&mut self, index: usize) -> MeasuredItem<Self::Handle>;

    /// Returns an element to the pool for reuse.
    fn recycle(&mut self, handle: Self::Handle);

    /// Decorated height of the item at `index`, without keeping it around.
    ///
    /// The default acquires and immediately recycles an element. Pools that can
    /// measure without materializing should override it.
    fn extent_of(&mut self, index: usize) -> i32 {
        let measured = self.acquire(index);
        let height = measured.height;
        self.recycle(measured.handle);
        height
    }
}

/// The scroll surface hosting a wheel list.
pub trait ScrollHost {
    /// Requests an animated scroll by `dy` pixels.
    ///
    /// The host later feeds the animation back through
    /// [`WheelList::on_scroll_by`](crate::WheelList::on_scroll_by) and reports
    /// [`WheelList::on_scroll_state_idle`](crate::WheelList::on_scroll_state_idle) when it ends.
    fn smooth_scroll_by(&mut self, dy: i32);

    /// Returns `true` while a smooth scroll requested earlier is still running.
    fn is_smooth_scrolling(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory host doubles shared by the unit tests.

    use alloc::vec::Vec;

    use super::{ItemPool, MeasuredItem, ScrollHost};

    /// Pool with per-item heights that records its traffic.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPool {
        pub(crate) heights: Vec<i32>,
        pub(crate) width: i32,
        pub(crate) outstanding: Vec<usize>,
        pub(crate) acquired: usize,
        /// Top and bottom decoration insets applied to every item.
        pub(crate) decorations: (i32, i32),
    }

    impl RecordingPool {
        pub(crate) fn uniform(len: usize, height: i32, width: i32) -> Self {
            Self::with_heights(alloc::vec![height; len], width)
        }

        pub(crate) fn with_heights(heights: Vec<i32>, width: i32) -> Self {
            Self {
                heights,
                width,
                outstanding: Vec::new(),
                acquired: 0,
                decorations: (0, 0),
            }
        }
    }

    impl ItemPool for RecordingPool {
        type Handle = usize;

        fn len(&self) -> usize {
            self.heights.len()
        }

        fn acquire(&mut self, index: usize) -> MeasuredItem<usize> {
            self.acquired += 1;
            self.outstanding.push(index);
            let (top, bottom) = self.decorations;
            MeasuredItem::new(index, self.width, self.heights[index]).with_decorations(top, bottom)
        }

        fn recycle(&mut self, handle: usize) {
            let pos = self
                .outstanding
                .iter()
                .position(|&h| h == handle)
                .expect("recycled a handle that was never acquired");
            self.outstanding.swap_remove(pos);
        }

        fn extent_of(&mut self, index: usize) -> i32 {
            self.heights[index]
        }
    }

    /// Host that records smooth-scroll requests.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub(crate) requests: Vec<i32>,
        pub(crate) animating: bool,
    }

    impl ScrollHost for RecordingHost {
        fn smooth_scroll_by(&mut self, dy: i32) {
            self.requests.push(dy);
        }

        fn is_smooth_scrolling(&self) -> bool {
            self.animating
        }
    }
}
