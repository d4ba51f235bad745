// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curve geometry: where an item sits horizontally for a given vertical offset,
//! and how much it shrinks away from the vertical center.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::WheelError;
use crate::error::positive;

/// The curve items are laid along, in whatever units the caller works in.
///
/// Items stack vertically; the curve only decides their horizontal offset.
/// A circle is the special case of an ellipse whose radii are equal, but the two
/// are kept apart so that configuration reads the way it is written.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveShape {
    /// A circle centered on the viewport's vertical center.
    Circle {
        /// Circle radius.
        radius: f64,
        /// Horizontal position of the circle's center.
        center_x: f64,
    },
    /// An ellipse centered on the viewport's vertical center.
    Ellipse {
        /// Horizontal semi-axis.
        major_radius: f64,
        /// Vertical semi-axis; bounds the vertical domain of the curve.
        minor_radius: f64,
        /// Horizontal position of the ellipse's center.
        center_x: f64,
    },
}

impl CurveShape {
    /// Creates a circular shape.
    #[must_use]
    pub const fn circle(radius: f64, center_x: f64) -> Self {
        Self::Circle { radius, center_x }
    }

    /// Creates an elliptical shape.
    #[must_use]
    pub const fn ellipse(major_radius: f64, minor_radius: f64, center_x: f64) -> Self {
        Self::Ellipse {
            major_radius,
            minor_radius,
            center_x,
        }
    }

    /// Half of the vertical extent covered by the curve.
    #[must_use]
    pub const fn vertical_radius(&self) -> f64 {
        match *self {
            Self::Circle { radius, .. } => radius,
            Self::Ellipse { minor_radius, .. } => minor_radius,
        }
    }

    /// Horizontal position of the curve's center.
    #[must_use]
    pub const fn center_x(&self) -> f64 {
        match *self {
            Self::Circle { center_x, .. } | Self::Ellipse { center_x, .. } => center_x,
        }
    }

    /// Checks that every radius is finite and strictly positive.
    pub fn validate(&self) -> Result<(), WheelError> {
        match *self {
            Self::Circle { radius, .. } => {
                positive("radius", radius)?;
            }
            Self::Ellipse {
                major_radius,
                minor_radius,
                ..
            } => {
                positive("major_radius", major_radius)?;
                positive("minor_radius", minor_radius)?;
            }
        }
        Ok(())
    }

    /// Returns the same shape with every length multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        match self {
            Self::Circle { radius, center_x } => Self::Circle {
                radius: radius * factor,
                center_x: center_x * factor,
            },
            Self::Ellipse {
                major_radius,
                minor_radius,
                center_x,
            } => Self::Ellipse {
                major_radius: major_radius * factor,
                minor_radius: minor_radius * factor,
                center_x: center_x * factor,
            },
        }
    }
}

/// A validated [`CurveShape`] anchored at a viewport's vertical center.
///
/// The vertical center is fixed once the viewport size is known, so a `Curve`
/// is built on attach and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Curve {
    shape: CurveShape,
    vertical_center: f64,
}

impl Curve {
    /// Creates a curve, rejecting non-positive or non-finite radii.
    pub fn new(shape: CurveShape, vertical_center: f64) -> Result<Self, WheelError> {
        shape.validate()?;
        Ok(Self {
            shape,
            vertical_center,
        })
    }

    /// Builds a curve from a shape that already went through [`CurveShape::validate`].
    pub(crate) const fn from_validated(shape: CurveShape, vertical_center: f64) -> Self {
        Self {
            shape,
            vertical_center,
        }
    }

    /// The underlying shape.
    #[must_use]
    pub const fn shape(&self) -> CurveShape {
        self.shape
    }

    /// The vertical offset the curve is centered on.
    #[must_use]
    pub const fn vertical_center(&self) -> f64 {
        self.vertical_center
    }

    /// Returns `true` if `y` lies within the curve's vertical domain.
    #[must_use]
    pub fn spans(&self, y: f64) -> bool {
        (y - self.vertical_center).abs() <= self.shape.vertical_radius()
    }

    /// Horizontal offset of the curve at vertical offset `y`.
    ///
    /// - Circle: `sqrt(r² − (y − vc)²) + center_x`
    /// - Ellipse: `sqrt((1 − (y − vc)² / minor²) · major²) + center_x`
    ///
    /// Returns `None` outside the vertical domain (see [`Curve::spans`]); callers
    /// treat such a position as not visible.
    #[must_use]
    pub fn horizontal_offset(&self, y: f64) -> Option<f64> {
        if !self.spans(y) {
            return None;
        }
        let dy = y - self.vertical_center;
        let x = match self.shape {
            CurveShape::Circle { radius, center_x } => {
                (radius * radius - dy * dy).max(0.0).sqrt() + center_x
            }
            CurveShape::Ellipse {
                major_radius,
                minor_radius,
                center_x,
            } => {
                let t = 1.0 - (dy * dy) / (minor_radius * minor_radius);
                (t * major_radius * major_radius).max(0.0).sqrt() + center_x
            }
        };
        Some(x)
    }
}

/// Normalized distance of an item's middle from the vertical center.
///
/// `|vertical_center − mid_y| / (viewport_height − item_height)`; zero when the
/// denominator is not positive (an item at least as tall as the viewport).
#[must_use]
pub fn depth_ratio(mid_y: f64, vertical_center: f64, viewport_height: f64, item_height: f64) -> f64 {
    let travel = viewport_height - item_height;
    if travel <= 0.0 {
        return 0.0;
    }
    (vertical_center - mid_y).abs() / travel
}

/// Depth scale for an item whose middle is at `mid_y`.
///
/// `1` at the vertical center, shrinking linearly toward `0` at the viewport edge.
/// Never negative. Independent of the curve variant.
#[must_use]
pub fn scale_for_position(
    mid_y: f64,
    vertical_center: f64,
    viewport_height: f64,
    item_height: f64,
) -> f64 {
    (1.0 - depth_ratio(mid_y, vertical_center, viewport_height, item_height)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{Curve, CurveShape, scale_for_position};
    use crate::WheelError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn circle_peaks_at_vertical_center() {
        let curve = Curve::new(CurveShape::circle(500.0, 50.0), 200.0).unwrap();
        assert_eq!(curve.horizontal_offset(200.0), Some(550.0));
        // 300-400-500 triangle.
        assert_eq!(curve.horizontal_offset(500.0), Some(450.0));
        assert_eq!(curve.horizontal_offset(700.0), Some(50.0));
    }

    #[test]
    fn circle_is_symmetric_about_vertical_center() {
        let curve = Curve::new(CurveShape::circle(500.0, 50.0), 200.0).unwrap();
        for y in [-300.0, -120.5, 0.0, 37.0, 199.0, 250.0] {
            let mirrored = 2.0 * 200.0 - y;
            let a = curve.horizontal_offset(y).unwrap();
            let b = curve.horizontal_offset(mirrored).unwrap();
            assert!(close(a, b), "asymmetric at {y}: {a} vs {b}");
        }
    }

    #[test]
    fn ellipse_uses_minor_radius_for_domain() {
        let curve = Curve::new(CurveShape::ellipse(300.0, 100.0, -20.0), 100.0).unwrap();
        assert_eq!(curve.horizontal_offset(100.0), Some(280.0));
        assert!(close(
            curve.horizontal_offset(150.0).unwrap(),
            (0.75_f64 * 90_000.0).sqrt() - 20.0
        ));
        assert!(curve.spans(200.0));
        assert!(!curve.spans(200.5));
        assert_eq!(curve.horizontal_offset(201.0), None);
    }

    #[test]
    fn outside_domain_is_none_not_nan() {
        let curve = Curve::new(CurveShape::circle(50.0, 0.0), 0.0).unwrap();
        assert_eq!(curve.horizontal_offset(51.0), None);
        assert_eq!(curve.horizontal_offset(-51.0), None);
        assert_eq!(curve.horizontal_offset(50.0), Some(0.0));
    }

    #[test]
    fn invalid_radii_are_rejected() {
        assert!(matches!(
            Curve::new(CurveShape::circle(0.0, 0.0), 0.0),
            Err(WheelError::InvalidGeometry {
                parameter: "radius",
                ..
            })
        ));
        assert!(matches!(
            Curve::new(CurveShape::ellipse(10.0, -1.0, 0.0), 0.0),
            Err(WheelError::InvalidGeometry {
                parameter: "minor_radius",
                ..
            })
        ));
    }

    #[test]
    fn scaled_shape_multiplies_every_length() {
        let shape = CurveShape::ellipse(10.0, 20.0, 3.0).scaled(2.0);
        assert_eq!(shape, CurveShape::ellipse(20.0, 40.0, 6.0));
    }

    #[test]
    fn scale_shrinks_linearly_from_center() {
        assert_eq!(scale_for_position(200.0, 200.0, 400.0, 100.0), 1.0);
        assert!(close(scale_for_position(50.0, 200.0, 400.0, 100.0), 0.5));
        assert!(close(scale_for_position(350.0, 200.0, 400.0, 100.0), 0.5));
        // Far outside the viewport the scale bottoms out instead of going negative.
        assert_eq!(scale_for_position(2000.0, 200.0, 400.0, 100.0), 0.0);
        // Items as tall as the viewport are never scaled.
        assert_eq!(scale_for_position(0.0, 200.0, 400.0, 400.0), 1.0);
    }
}
