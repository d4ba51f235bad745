// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time errors.

use thiserror::Error;

/// Errors reported while resolving a [`WheelConfig`](crate::WheelConfig).
///
/// Only construction can fail. Runtime entry points such as
/// [`WheelList::on_scroll_by`](crate::WheelList::on_scroll_by) never return an error:
/// an empty data source makes a fill a no-op and out-of-range indices are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum WheelError {
    /// A curve radius was zero, negative, or not finite.
    #[error("curve {parameter} must be finite and positive, got {value}")]
    InvalidGeometry {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The dp→px density factor was zero, negative, or not finite.
    #[error("density must be finite and positive, got {value}")]
    InvalidDensity {
        /// The rejected value.
        value: f64,
    },
    /// A margin or step limit was negative or not finite.
    #[error("{parameter} must be finite and non-negative, got {value}")]
    InvalidMargin {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
}

pub(crate) fn positive(parameter: &'static str, value: f64) -> Result<f64, WheelError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WheelError::InvalidGeometry { parameter, value })
    }
}

pub(crate) fn non_negative(parameter: &'static str, value: f64) -> Result<f64, WheelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(WheelError::InvalidMargin { parameter, value })
    }
}
