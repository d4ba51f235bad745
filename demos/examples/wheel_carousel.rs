// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotary carousel: ring gestures driving a curve-anchored wheel list.
//!
//! This example shows how to combine:
//! - `understory_event_state::wheel` to turn touches on a ring into scroll deltas,
//! - `understory_wheel_list` to virtualize rows along an ellipse and settle them,
//! - a frame-stepping [`FrameAnimator`] standing in for the host's smooth scroller.
//!
//! Run:
//! - `cargo run -p understory_demos --example wheel_carousel`
//! - `RUST_LOG=understory_wheel_list=trace cargo run -p understory_demos --example wheel_carousel`

use kurbo::{Point, Rect, Size, Vec2};
use understory_demos::{FrameAnimator, init_tracing};
use understory_event_state::wheel::{WheelGesture, WheelRing};
use understory_wheel_list::{CurveShape, FixedItemPool, WheelConfig, WheelError, WheelList};

const FACE: f64 = 360.0;

fn print_rows(label: &str, wheel: &WheelList<usize>) {
    println!("{label}:");
    for item in wheel.items() {
        let bar = "#".repeat((item.scale * 20.0).round() as usize);
        println!(
            "  row {:>2}  top {:>4}  left {:>4}  scale {:.2}  {bar}",
            item.index, item.top, item.left, item.scale
        );
    }
}

/// Plays back everything the animator has queued, then reports idle.
fn run_animation(
    wheel: &mut WheelList<usize>,
    pool: &mut FixedItemPool,
    animator: &mut FrameAnimator,
) {
    for _ in 0..8 {
        while let Some(dy) = animator.next_frame() {
            wheel.on_scroll_by(dy, pool, animator);
        }
        // Settling may queue another animation; keep going until it is quiet.
        if wheel.on_scroll_state_idle(pool, animator).is_none() {
            break;
        }
    }
}

fn main() -> Result<(), WheelError> {
    init_tracing();

    let config = WheelConfig::new(CurveShape::ellipse(120.0, 200.0, 40.0))
        .with_density(1.5)
        .with_overscroll_margin(8.0);
    let mut wheel = WheelList::new(&config)?;
    let mut pool = FixedItemPool::new(30, 140, 60);
    let mut animator = FrameAnimator::new(12);

    wheel.on_attach(Rect::new(0.0, 0.0, FACE, FACE));
    wheel.on_layout(&mut pool, &mut animator);
    run_animation(&mut wheel, &mut pool, &mut animator);
    print_rows("after initial layout", &wheel);

    // The outer 70px of the face is the rotary ring.
    let mut gesture = WheelGesture::new(WheelRing::from_bounds(Size::new(FACE, FACE), 70.0));
    let mut touch = Point::new(FACE / 2.0, 20.0);
    if gesture.on_down(touch) {
        // Slide clockwise along the top of the ring, 8px at a time.
        for _ in 0..12 {
            let moved = Vec2::new(8.0, 1.5);
            touch += moved;
            if let Some(delta) = gesture.on_scroll(touch, moved) {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Rotary deltas are a few pixels per event"
                )]
                let dy = delta.round() as i32;
                let consumed = wheel.on_scroll_by(dy, &mut pool, &mut animator);
                tracing::debug!(delta, consumed, "rotary scroll");
            }
        }
        if gesture.on_up() {
            run_animation(&mut wheel, &mut pool, &mut animator);
        }
    }
    print_rows("after rotating the ring", &wheel);

    // Jump far ahead, then animate back a few rows.
    wheel.scroll_to_position(25, &pool);
    wheel.on_layout(&mut pool, &mut animator);
    run_animation(&mut wheel, &mut pool, &mut animator);
    print_rows("after jumping to row 25", &wheel);

    wheel.smooth_scroll_to_position(20, &mut pool, &mut animator);
    run_animation(&mut wheel, &mut pool, &mut animator);
    print_rows("after animating to row 20", &wheel);

    println!(
        "visible rows {:?}, {} live handles, {} acquisitions",
        wheel.visible_indices(),
        pool.live(),
        pool.acquired()
    );

    wheel.on_detach(&mut pool);
    assert_eq!(pool.live(), 0);
    Ok(())
}
