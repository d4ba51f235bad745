// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scaffolding for the runnable demos.
//!
//! Run:
//! - `cargo run -p understory_demos --example wheel_carousel`

use tracing_subscriber::EnvFilter;
use understory_wheel_list::ScrollHost;

/// Installs a formatting subscriber that respects `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed when demos run under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// A [`ScrollHost`] that plays smooth scrolls back in fixed-size frames.
#[derive(Clone, Copy, Debug)]
pub struct FrameAnimator {
    remaining: i32,
    frame_step: i32,
}

impl FrameAnimator {
    /// Creates an animator that moves at most `frame_step` pixels per frame.
    pub fn new(frame_step: i32) -> Self {
        Self {
            remaining: 0,
            frame_step: frame_step.max(1),
        }
    }

    /// Returns the displacement for the next frame, or `None` once the animation ended.
    pub fn next_frame(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        let step = self.remaining.clamp(-self.frame_step, self.frame_step);
        self.remaining -= step;
        Some(step)
    }
}

impl ScrollHost for FrameAnimator {
    fn smooth_scroll_by(&mut self, dy: i32) {
        self.remaining += dy;
    }

    fn is_smooth_scrolling(&self) -> bool {
        self.remaining != 0
    }
}
