// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The controller that owns the anchor, the item window, and the fill pass.

use core::ops::Range;

use kurbo::Rect;
use tracing::{debug, trace, warn};

use crate::curve::depth_ratio;
use crate::{
    Curve, Item, ItemPool, ItemWindow, MeasuredItem, ResolvedConfig, ScrollHost, WheelConfig,
    WheelError,
};

/// Whether a scroll gesture is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScrollPhase {
    /// No gesture or animation is feeding scroll deltas. Layout settles in this phase.
    #[default]
    Idle,
    /// Scroll deltas are arriving; settling waits for the host to report idle.
    Dragging,
}

/// The anchor: together with the item sizes it fully determines a fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrollState {
    /// Data-source index of the first item laid out.
    ///
    /// This is normally the first materialized item; it is skipped when its middle
    /// lies outside the curve.
    pub start_index: usize,
    /// Top of the `start_index` item relative to the viewport top.
    pub top_of_first_child: i32,
}

/// Viewport geometry captured on attach.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Viewport {
    pub(crate) bounds: Rect,
    pub(crate) height: i32,
    pub(crate) vertical_center: i32,
    pub(crate) curve: Curve,
}

impl Viewport {
    /// Returns `true` if an item occupying `rect` should be materialized.
    ///
    /// The rectangle must overlap (with positive area) or lie inside the viewport
    /// grown vertically by `margin`.
    fn admits(&self, rect: Rect, margin: i32) -> bool {
        let margin = f64::from(margin);
        let b = Rect::new(
            0.0,
            -margin,
            self.bounds.width(),
            self.bounds.height() + margin,
        );
        let overlaps = b.x0 < rect.x1 && rect.x0 < b.x1 && b.y0 < rect.y1 && rect.y0 < b.y1;
        let contained = b.x0 <= rect.x0 && b.y0 <= rect.y0 && b.x1 >= rect.x1 && b.y1 >= rect.y1;
        overlaps || contained
    }
}

/// Virtualizes a vertical list onto a circle or ellipse inside a fixed viewport.
///
/// This type:
/// - owns the anchor ([`ScrollState`]) and the [`ItemWindow`] of materialized items,
/// - fills the window from the anchor, placing each item on the curve and scaling it
///   by its distance from the vertical center,
/// - integrates scroll deltas with head and tail boundaries,
/// - settles the item nearest the vertical center once scrolling stops.
///
/// It does *not* draw anything. Hosts read [`WheelList::items`] after each call and
/// apply the geometry to their own elements, obtained through an [`ItemPool`].
///
/// Lifecycle: [`on_attach`](Self::on_attach) once the viewport size is known, then
/// [`on_layout`](Self::on_layout), [`on_scroll_by`](Self::on_scroll_by) and
/// [`on_scroll_state_idle`](Self::on_scroll_state_idle) as the host's events arrive.
#[derive(Debug)]
pub struct WheelList<H> {
    pub(crate) config: ResolvedConfig,
    pub(crate) viewport: Option<Viewport>,
    pub(crate) window: ItemWindow<H>,
    pub(crate) anchor: ScrollState,
    pub(crate) phase: ScrollPhase,
    pending_jump: bool,
}

impl<H> WheelList<H> {
    /// Creates a wheel list, validating `config` and converting it to pixels.
    pub fn new(config: &WheelConfig) -> Result<Self, WheelError> {
        Ok(Self::with_resolved(config.resolve()?))
    }

    /// Creates a wheel list from an already resolved configuration.
    #[must_use]
    pub fn with_resolved(config: ResolvedConfig) -> Self {
        Self {
            config,
            viewport: None,
            window: ItemWindow::new(),
            anchor: ScrollState::default(),
            phase: ScrollPhase::Idle,
            pending_jump: false,
        }
    }

    /// The resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Captures the viewport and resets the anchor and scroll phase.
    ///
    /// Only the size of `viewport` matters; items are positioned relative to its
    /// top-left corner.
    pub fn on_attach(&mut self, viewport: Rect) {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Viewport sizes are whole pixels; truncation matches the host's integer layout"
        )]
        let height = viewport.height().max(0.0) as i32;
        let vertical_center = height / 2;
        self.viewport = Some(Viewport {
            bounds: viewport,
            height,
            vertical_center,
            curve: Curve::from_validated(self.config.shape, f64::from(vertical_center)),
        });
        self.anchor = ScrollState::default();
        self.phase = ScrollPhase::Idle;
        self.pending_jump = false;
        debug!(height, vertical_center, "wheel attached");
    }

    /// Releases every materialized item and forgets the viewport.
    pub fn on_detach<P>(&mut self, pool: &mut P)
    where
        P: ItemPool<Handle = H>,
    {
        self.window.release_all(pool);
        self.viewport = None;
    }

    /// Releases every materialized item and resets the anchor to the head of the list.
    ///
    /// Call this whenever the data source is replaced or item sizes change.
    pub fn on_data_set_changed<P>(&mut self, pool: &mut P)
    where
        P: ItemPool<Handle = H>,
    {
        self.window.release_all(pool);
        self.anchor = ScrollState::default();
        self.pending_jump = false;
    }

    /// Lays out the window from the current anchor.
    ///
    /// Closes any gaps left by a [`scroll_to_position`](Self::scroll_to_position)
    /// first, then moves the anchor by whole items until its offset lies within the
    /// first item. Does nothing before [`on_attach`](Self::on_attach).
    pub fn on_layout<P, S>(&mut self, pool: &mut P, host: &mut S)
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        if self.viewport.is_none() {
            warn!("layout requested before the wheel was attached");
            return;
        }
        if self.pending_jump {
            self.close_jump_gaps(pool);
        }
        self.normalize_anchor(pool);
        self.fill(self.anchor.start_index, pool, host);
    }

    /// Recomputes the whole window starting at `start_index`.
    ///
    /// Every previously materialized item is moved to a scrap list first; items
    /// that are still visible reuse their handle, the rest go back to `pool`.
    ///
    /// Items are laid out top to bottom from the anchor's offset. An item counts as
    /// invisible when it does not intersect the viewport (grown by the overscroll
    /// margin) or when its middle falls outside the curve. Invisible items ahead of
    /// the first visible one are skipped, so the window may begin after
    /// `start_index`; the first invisible item after that ends the walk, as does
    /// reaching the bottom bound. The anchor's offset is left untouched;
    /// `start_index` is clamped to the last item.
    ///
    /// When no gesture is in progress and auto-stabilization is enabled, the nearest
    /// item is settled afterwards.
    pub fn fill<P, S>(&mut self, start_index: usize, pool: &mut P, host: &mut S)
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        let Some(viewport) = self.viewport else {
            return;
        };
        let len = pool.len();
        if len == 0 {
            self.window.release_all(pool);
            return;
        }
        let start = if start_index < len {
            start_index
        } else {
            warn!(start_index, len, "fill start clamped to the last item");
            len - 1
        };

        let bottom_bound = viewport.height + self.config.overscroll_margin;
        let mut scrap = core::mem::take(&mut self.window);
        let mut top = self.anchor.top_of_first_child;
        let mut skipped = 0_usize;
        for index in start..len {
            if top >= bottom_bound {
                break;
            }
            scrap.release_before(index, pool);
            let measured = match scrap.pop_front_if(index) {
                Some((handle, old)) => MeasuredItem::new(handle, old.width, old.height())
                    .with_decorations(old.decoration_top, old.decoration_bottom),
                None => pool.acquire(index),
            };
            let height = measured.height;
            match self.place(&viewport, index, len, top, &measured) {
                Some(item) => {
                    top = item.bottom;
                    self.window.push_back(measured.handle, item);
                }
                None if self.window.is_empty() => {
                    pool.recycle(measured.handle);
                    top += height;
                    skipped += 1;
                }
                None => {
                    pool.recycle(measured.handle);
                    break;
                }
            }
        }
        scrap.release_all(pool);
        self.anchor.start_index = start;

        trace!(
            start,
            top = self.anchor.top_of_first_child,
            skipped,
            materialized = self.window.len(),
            "fill"
        );

        if self.phase == ScrollPhase::Idle && self.config.auto_stabilize {
            self.stabilize(pool, host);
        }
    }

    /// Positions one item whose top is at `top`, or `None` if it is not visible.
    fn place(
        &self,
        viewport: &Viewport,
        index: usize,
        len: usize,
        top: i32,
        measured: &MeasuredItem<H>,
    ) -> Option<Item> {
        let height = measured.height;
        let bottom = top + height;
        let mid = (top + bottom) / 2;
        // The end items can be placed by their content alone.
        let curve_y = match (self.config.ignore_header_footer_margins, index) {
            (true, 0) => {
                let inset = measured.decoration_top;
                top + inset + (height - inset) / 2
            }
            (true, i) if i + 1 == len => top + (height - measured.decoration_bottom) / 2,
            _ => mid,
        };
        let x = viewport.curve.horizontal_offset(f64::from(curve_y))?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Curve offsets are bounded by the configured radii"
        )]
        let left = x as i32;
        let item = Item {
            index,
            top,
            bottom,
            left,
            width: measured.width,
            decoration_top: measured.decoration_top,
            decoration_bottom: measured.decoration_bottom,
            scale: 1.0,
        };
        if !viewport.admits(item.rect(), self.config.overscroll_margin) {
            return None;
        }
        let ratio = depth_ratio(
            f64::from(mid),
            f64::from(viewport.vertical_center),
            f64::from(viewport.height),
            f64::from(height),
        );
        Some(Item {
            scale: (1.0 - self.config.scaling_factor * ratio).max(0.0),
            ..item
        })
    }

    /// Jumps so that `index` becomes the anchor item; takes effect on the next layout.
    ///
    /// With [`WheelConfig::center_on_jump`] the item ends up centered, otherwise at
    /// the top. Either way the next layout closes gaps at the head and tail of the list.
    /// Indices past the end are clamped to the last item.
    pub fn scroll_to_position<P>(&mut self, index: usize, pool: &P)
    where
        P: ItemPool<Handle = H>,
    {
        let len = pool.len();
        if len == 0 {
            return;
        }
        let index = if index < len {
            index
        } else {
            warn!(index, len, "scroll_to_position clamped to the last item");
            len - 1
        };
        self.anchor = ScrollState {
            start_index: index,
            top_of_first_child: 0,
        };
        self.pending_jump = true;
    }

    /// Requests an animated scroll that brings `index` to the center (or top).
    ///
    /// The distance is derived from the anchor and the item extents, so the target
    /// does not need to be materialized. Returns the requested displacement.
    pub fn smooth_scroll_to_position<P, S>(
        &self,
        index: usize,
        pool: &mut P,
        host: &mut S,
    ) -> Option<i32>
    where
        P: ItemPool<Handle = H>,
        S: ScrollHost,
    {
        let viewport = self.viewport?;
        let len = pool.len();
        if len == 0 {
            return None;
        }
        let index = index.min(len - 1);
        let ScrollState {
            start_index,
            top_of_first_child: mut top,
        } = self.anchor;
        if index >= start_index {
            for i in start_index..index {
                top = top.saturating_add(pool.extent_of(i));
            }
        } else {
            for i in index..start_index {
                top = top.saturating_sub(pool.extent_of(i));
            }
        }
        let dy = if self.config.center_on_jump {
            top + pool.extent_of(index) / 2 - viewport.vertical_center
        } else {
            top
        };
        if dy != 0 {
            debug!(index, dy, "smooth scroll to position");
            host.smooth_scroll_by(dy);
        }
        Some(dy)
    }

    /// Moves the anchor requested by a jump so that no empty space shows above the
    /// first item or below the last one.
    fn close_jump_gaps<P>(&mut self, pool: &mut P)
    where
        P: ItemPool<Handle = H>,
    {
        self.pending_jump = false;
        let (Some(viewport), len) = (self.viewport, pool.len()) else {
            return;
        };
        if len == 0 {
            self.anchor = ScrollState::default();
            return;
        }

        if self.config.center_on_jump {
            let target = self.anchor.start_index;
            let mut gap = viewport.vertical_center - pool.extent_of(target) / 2;
            let mut index = target;
            while gap > 0 && index > 0 {
                index -= 1;
                gap -= pool.extent_of(index);
            }
            self.anchor = if gap > 0 {
                ScrollState::default()
            } else {
                ScrollState {
                    start_index: index,
                    top_of_first_child: gap,
                }
            };
        }

        if self.anchor.start_index != 0 {
            let mut gap = viewport.height;
            let mut index = len;
            while gap > 0 && index > 0 {
                index -= 1;
                gap -= pool.extent_of(index);
            }
            if gap > 0 {
                // The whole list is shorter than the viewport.
                self.anchor = ScrollState::default();
            } else if index < self.anchor.start_index
                || (index == self.anchor.start_index && gap > self.anchor.top_of_first_child)
            {
                self.anchor = ScrollState {
                    start_index: index,
                    top_of_first_child: gap,
                };
            }
        }
        debug!(
            start = self.anchor.start_index,
            top = self.anchor.top_of_first_child,
            "jump anchored"
        );
    }

    /// The materialized items, in index order.
    #[must_use]
    pub const fn window(&self) -> &ItemWindow<H> {
        &self.window
    }

    /// Convenience iterator over materialized item placements.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> + ExactSizeIterator {
        self.window.iter()
    }

    /// Indices of items that overlap the viewport itself (ignoring the overscroll margin).
    #[must_use]
    pub fn visible_indices(&self) -> Range<usize> {
        let Some(viewport) = self.viewport else {
            return 0..0;
        };
        let mut visible = self
            .window
            .iter()
            .filter(|item| item.bottom > 0 && item.top < viewport.height)
            .map(|item| item.index);
        match visible.next() {
            Some(first) => {
                let last = visible.last().unwrap_or(first);
                first..last + 1
            }
            None => 0..0,
        }
    }

    /// Returns the first index overlapping the viewport, if any.
    #[must_use]
    pub fn first_visible_index(&self) -> Option<usize> {
        let range = self.visible_indices();
        (!range.is_empty()).then_some(range.start)
    }

    /// Returns the last index overlapping the viewport, if any.
    #[must_use]
    pub fn last_visible_index(&self) -> Option<usize> {
        let range = self.visible_indices();
        (!range.is_empty()).then(|| range.end - 1)
    }

    /// The current anchor, suitable for saving and later restoring.
    #[must_use]
    pub const fn scroll_state(&self) -> ScrollState {
        self.anchor
    }

    /// Restores a saved anchor; the next layout fills from it.
    ///
    /// Offsets reaching past the first item are accepted and normalized on that
    /// layout: a saved `(0, -1050)` over 100px rows lays out as `(10, -50)`, and an
    /// offset past the end of the list puts the last item at the viewport bottom.
    pub fn restore_scroll_state(&mut self, state: ScrollState) {
        self.anchor = state;
    }

    /// The current scroll phase.
    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Viewport bounds captured on attach.
    #[must_use]
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport.map(|v| v.bounds)
    }

    /// Vertical center of the viewport in pixels, once attached.
    #[must_use]
    pub fn vertical_center(&self) -> Option<i32> {
        self.viewport.map(|v| v.vertical_center)
    }

    /// The curve anchored at the viewport's vertical center, once attached.
    #[must_use]
    pub fn curve(&self) -> Option<Curve> {
        self.viewport.map(|v| v.curve)
    }
}
