// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary checks against the drawable plot rectangle.
//!
//! A candidate either fits entirely or is rejected; labels are never clipped.

use kurbo::{Rect, Size};

use crate::geometry::LabelBox;

/// Returns `true` if `label_box` lies inside `[0, plot.width] × [0, plot.height]`.
pub fn fits(label_box: &LabelBox, plot: Size) -> bool {
    fits_within(label_box, Rect::from_origin_size((0.0, 0.0), plot))
}

/// Returns `true` if `label_box` lies inside an arbitrary plot rectangle.
///
/// Useful when the plot area is inset inside a larger view (axes, legends).
pub fn fits_within(label_box: &LabelBox, plot: Rect) -> bool {
    label_box.is_within(plot.abs())
}
