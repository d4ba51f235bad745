// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time configuration.
//!
//! All lengths in [`WheelConfig`] are in device-independent units. They are
//! converted to pixels exactly once, by [`WheelConfig::resolve`].

use crate::error::{WheelError, non_negative};
use crate::CurveShape;

/// Default upper bound on a single scroll step, in device-independent units.
pub const DEFAULT_MAX_SCROLL_STEP: f64 = 150.0;

/// Configuration for a [`WheelList`](crate::WheelList).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelConfig {
    /// Curve the items are laid along.
    pub shape: CurveShape,
    /// Pixels per device-independent unit.
    pub density: f64,
    /// Extra space above and below the viewport in which items are still materialized.
    pub overscroll_margin: f64,
    /// Largest scroll delta honored by a single scroll event.
    pub max_scroll_step: f64,
    /// How strongly items shrink away from the vertical center; `0.0` disables scaling.
    pub scaling_factor: f64,
    /// Settle the nearest item to the center after layout and when scrolling goes idle.
    pub auto_stabilize: bool,
    /// Center the target of a programmatic jump instead of aligning it to the top.
    pub center_on_jump: bool,
    /// Place the first item by its content below the top decoration, and the last
    /// item by its content above the bottom decoration.
    ///
    /// Useful when header and footer spacing is added as decoration so the list can
    /// start and end at the vertical center.
    pub ignore_header_footer_margins: bool,
}

impl WheelConfig {
    /// Creates a configuration with default tuning for the given curve.
    #[must_use]
    pub const fn new(shape: CurveShape) -> Self {
        Self {
            shape,
            density: 1.0,
            overscroll_margin: 0.0,
            max_scroll_step: DEFAULT_MAX_SCROLL_STEP,
            scaling_factor: 1.0,
            auto_stabilize: true,
            center_on_jump: true,
            ignore_header_footer_margins: false,
        }
    }

    /// Sets the dp→px density factor.
    #[must_use]
    pub const fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the overscroll margin.
    #[must_use]
    pub const fn with_overscroll_margin(mut self, margin: f64) -> Self {
        self.overscroll_margin = margin;
        self
    }

    /// Sets the per-event scroll limit.
    #[must_use]
    pub const fn with_max_scroll_step(mut self, step: f64) -> Self {
        self.max_scroll_step = step;
        self
    }

    /// Sets the depth scaling factor.
    #[must_use]
    pub const fn with_scaling_factor(mut self, factor: f64) -> Self {
        self.scaling_factor = factor;
        self
    }

    /// Enables or disables automatic settling.
    #[must_use]
    pub const fn with_auto_stabilize(mut self, enabled: bool) -> Self {
        self.auto_stabilize = enabled;
        self
    }

    /// Chooses between centering and top-aligning programmatic jump targets.
    #[must_use]
    pub const fn with_center_on_jump(mut self, center: bool) -> Self {
        self.center_on_jump = center;
        self
    }

    /// Chooses whether the end items are placed by their undecorated content.
    #[must_use]
    pub const fn with_ignore_header_footer_margins(mut self, ignore: bool) -> Self {
        self.ignore_header_footer_margins = ignore;
        self
    }

    /// Validates the configuration and converts every length to pixels.
    pub fn resolve(&self) -> Result<ResolvedConfig, WheelError> {
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(WheelError::InvalidDensity {
                value: self.density,
            });
        }
        self.shape.validate()?;
        let margin = non_negative("overscroll_margin", self.overscroll_margin)?;
        let step = non_negative("max_scroll_step", self.max_scroll_step)?;
        let scaling_factor = non_negative("scaling_factor", self.scaling_factor)?;

        Ok(ResolvedConfig {
            shape: self.shape.scaled(self.density),
            overscroll_margin: to_px(margin, self.density),
            max_scroll_step: to_px(step, self.density),
            scaling_factor,
            auto_stabilize: self.auto_stabilize,
            center_on_jump: self.center_on_jump,
            ignore_header_footer_margins: self.ignore_header_footer_margins,
        })
    }
}

/// A validated [`WheelConfig`] with lengths in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedConfig {
    /// Curve in pixels.
    pub shape: CurveShape,
    /// Overscroll margin in pixels.
    pub overscroll_margin: i32,
    /// Per-event scroll limit in pixels.
    pub max_scroll_step: i32,
    /// Depth scaling factor.
    pub scaling_factor: f64,
    /// See [`WheelConfig::auto_stabilize`].
    pub auto_stabilize: bool,
    /// See [`WheelConfig::center_on_jump`].
    pub center_on_jump: bool,
    /// See [`WheelConfig::ignore_header_footer_margins`].
    pub ignore_header_footer_margins: bool,
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Validated finite non-negative lengths; saturating float-to-int cast"
)]
fn to_px(dp: f64, density: f64) -> i32 {
    (dp * density + 0.5) as i32
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAX_SCROLL_STEP, WheelConfig};
    use crate::{CurveShape, WheelError};

    #[test]
    fn defaults_match_documented_tuning() {
        let config = WheelConfig::new(CurveShape::circle(200.0, 0.0));
        assert_eq!(config.density, 1.0);
        assert_eq!(config.overscroll_margin, 0.0);
        assert_eq!(config.max_scroll_step, DEFAULT_MAX_SCROLL_STEP);
        assert!(config.auto_stabilize);
        assert!(config.center_on_jump);
        assert!(!config.ignore_header_footer_margins);
        assert!(
            config
                .with_ignore_header_footer_margins(true)
                .resolve()
                .unwrap()
                .ignore_header_footer_margins
        );
    }

    #[test]
    fn resolve_converts_lengths_once() {
        let resolved = WheelConfig::new(CurveShape::ellipse(100.0, 80.0, 10.0))
            .with_density(2.5)
            .with_overscroll_margin(16.0)
            .resolve()
            .unwrap();
        assert_eq!(resolved.shape, CurveShape::ellipse(250.0, 200.0, 25.0));
        assert_eq!(resolved.overscroll_margin, 40);
        assert_eq!(resolved.max_scroll_step, 375);
    }

    #[test]
    fn resolve_rejects_bad_input() {
        let base = WheelConfig::new(CurveShape::circle(100.0, 0.0));
        assert_eq!(
            base.with_density(0.0).resolve(),
            Err(WheelError::InvalidDensity { value: 0.0 })
        );
        assert!(matches!(
            base.with_overscroll_margin(-4.0).resolve(),
            Err(WheelError::InvalidMargin {
                parameter: "overscroll_margin",
                ..
            })
        ));
        assert!(matches!(
            WheelConfig::new(CurveShape::circle(-1.0, 0.0)).resolve(),
            Err(WheelError::InvalidGeometry { .. })
        ));
    }
}
