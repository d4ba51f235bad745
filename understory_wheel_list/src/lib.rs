// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_wheel_list --heading-base-level=0

//! Understory Wheel List: list virtualization along a circle or ellipse.
//!
//! This crate virtualizes a dense vertical strip of items indexed `0..len` inside a
//! fixed viewport, like a carousel or a watch-face wheel. Items stack edge to edge
//! vertically; each one is pushed horizontally onto a curve and scaled by how far its
//! middle is from the viewport's vertical center.
//!
//! The core concepts are:
//!
//! - [`CurveShape`] and [`Curve`]: the circle or ellipse items are laid along, and
//!   [`scale_for_position`] for the depth cue.
//! - [`ItemPool`]: the host's source of measured display elements, acquired and
//!   recycled as items enter and leave the viewport.
//! - [`ItemWindow`]: the contiguous run of currently materialized [`Item`]s.
//! - [`WheelList`]: the controller. It owns the anchor ([`ScrollState`]), fills the
//!   window, integrates scroll deltas with head and tail boundaries, and asks the
//!   [`ScrollHost`] to animate the nearest item to the center once scrolling stops.
//!
//! This crate does **not** draw, animate, or dispatch input. Host frameworks are
//! responsible for:
//!
//! - Calling [`WheelList::on_layout`], [`WheelList::on_scroll_by`] and
//!   [`WheelList::on_scroll_state_idle`] from their layout and scroll callbacks.
//! - Applying each [`Item`]'s position and scale to their own elements.
//! - Running the smooth scrolls requested through [`ScrollHost::smooth_scroll_by`] and
//!   feeding the frames back through [`WheelList::on_scroll_by`].
//!
//! Configuration ([`WheelConfig`]) is in device-independent units and is converted to
//! pixels once, when the list is created.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_wheel_list::{CurveShape, FixedItemPool, ScrollHost, WheelConfig, WheelList};
//!
//! #[derive(Default)]
//! struct Host {
//!     pending: Option<i32>,
//! }
//!
//! impl ScrollHost for Host {
//!     fn smooth_scroll_by(&mut self, dy: i32) {
//!         self.pending = Some(dy);
//!     }
//! }
//!
//! // 20 rows, 80px wide and 100px tall, on a circle of radius 500.
//! let config = WheelConfig::new(CurveShape::circle(500.0, 50.0));
//! let mut wheel = WheelList::new(&config).unwrap();
//! let mut pool = FixedItemPool::new(20, 80, 100);
//! let mut host = Host::default();
//!
//! wheel.on_attach(Rect::new(0.0, 0.0, 600.0, 400.0));
//! wheel.on_layout(&mut pool, &mut host);
//! assert_eq!(wheel.first_visible_index(), Some(0));
//!
//! // The initial layout asked for item 2 to be centered; play that back.
//! let dy = host.pending.take().unwrap();
//! wheel.on_scroll_by(dy, &mut pool, &mut host);
//! wheel.on_scroll_state_idle(&mut pool, &mut host);
//!
//! let centered = wheel.items().find(|item| item.index == 2).unwrap();
//! assert_eq!(centered.mid_y(), 200);
//! assert_eq!(centered.scale, 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when building
//! without `std`.

#![no_std]

extern crate alloc;

mod config;
mod curve;
mod error;
mod fixed;
mod model;
mod scroll;
mod settle;
mod wheel_list;
mod window;

pub use config::{DEFAULT_MAX_SCROLL_STEP, ResolvedConfig, WheelConfig};
pub use curve::{Curve, CurveShape, depth_ratio, scale_for_position};
pub use error::WheelError;
pub use fixed::FixedItemPool;
pub use model::{ItemPool, MeasuredItem, ScrollHost};
pub use wheel_list::{ScrollPhase, ScrollState, WheelList};
pub use window::{Item, ItemWindow};
