// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label boxes and the small amount of rectangle math placement needs.

use kurbo::{Point, Rect, Size, Vec2};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// How a label's measured width maps onto its reference point.
///
/// This mirrors SVG's `text-anchor`: a renderer draws the label at the
/// reference point using the corresponding anchor and a middle baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// The reference point is the label's left edge (`text-anchor="start"`).
    Leading,
    /// The reference point is the label's horizontal center (`text-anchor="middle"`).
    Centered,
    /// The reference point is the label's right edge (`text-anchor="end"`).
    Trailing,
}

impl HorizontalAlign {
    /// Returns the signed distance from the label center to the reference point.
    pub(crate) fn anchor_shift(self, width: f64) -> f64 {
        match self {
            Self::Leading => -0.5 * width,
            Self::Centered => 0.0,
            Self::Trailing => 0.5 * width,
        }
    }
}

/// An axis-aligned rectangle bounding a positioned label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelBox(pub Rect);

impl LabelBox {
    /// Builds the box for a label whose reference point is `anchor`.
    ///
    /// Vertically the label is centered on `anchor.y`.
    pub fn from_anchor(anchor: Point, size: Size, align: HorizontalAlign) -> Self {
        let center = anchor - Vec2::new(align.anchor_shift(size.width), 0.0);
        Self::from_center(center, size)
    }

    /// Builds the box for a label centered at `center`.
    pub fn from_center(center: Point, size: Size) -> Self {
        Self(Rect::from_center_size(center, size))
    }

    /// Returns the underlying rectangle.
    pub fn rect(&self) -> Rect {
        self.0
    }

    /// Returns the box center.
    pub fn center(&self) -> Point {
        self.0.center()
    }

    /// Half the length of the box diagonal.
    pub fn half_diagonal(&self) -> f64 {
        0.5 * self.0.width().hypot(self.0.height())
    }

    /// Strict axis-aligned overlap test.
    ///
    /// Boxes that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let a = self.0;
        let b = other.0;
        a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
    }

    /// Returns `true` if the box lies entirely inside `bounds` (edges included).
    ///
    /// Written as a conjunction of positive tests so that a box with NaN
    /// coordinates never fits.
    pub fn is_within(&self, bounds: Rect) -> bool {
        let r = self.0;
        r.x0 >= bounds.x0 && r.x1 <= bounds.x1 && r.y0 >= bounds.y0 && r.y1 <= bounds.y1
    }

    /// Returns `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        let r = self.0;
        r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
    }

    /// Euclidean distance from `p` to the nearest point of the box (zero inside).
    pub fn distance_to(&self, p: Point) -> f64 {
        let r = self.0;
        let nearest = Point::new(p.x.clamp(r.x0, r.x1), p.y.clamp(r.y0, r.y1));
        (p - nearest).hypot()
    }
}
