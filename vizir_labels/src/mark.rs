// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchored marks that need a label.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use core::borrow::Borrow;
use core::fmt;

use kurbo::Point;

/// A stable, cheaply clonable mark identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(Arc<str>);

impl MarkId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkId {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for MarkId {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl Borrow<str> for MarkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rendered data glyph (point, bubble, square) anchored at a plot coordinate.
///
/// `half_extent` approximates the glyph's collision radius: the circle radius
/// for bubbles, half the side for squares, zero for bare points.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Identifier used to look the placement up afterwards.
    pub id: MarkId,
    /// Center of the glyph in plot coordinates.
    pub center: Point,
    /// Collision radius of the glyph.
    pub half_extent: f64,
}

impl Mark {
    /// Creates a mark with an explicit collision radius.
    pub fn new(id: impl Into<MarkId>, center: impl Into<Point>, half_extent: f64) -> Self {
        Self {
            id: id.into(),
            center: center.into(),
            half_extent,
        }
    }

    /// A circular glyph (scatter point, bubble) of the given radius.
    pub fn circle(id: impl Into<MarkId>, center: impl Into<Point>, radius: f64) -> Self {
        Self::new(id, center, radius)
    }

    /// A square glyph of the given side length.
    pub fn square(id: impl Into<MarkId>, center: impl Into<Point>, side: f64) -> Self {
        Self::new(id, center, 0.5 * side)
    }

    /// Returns `false` for geometry the planner refuses to search with.
    ///
    /// Non-finite coordinates or a non-finite/negative extent would poison every
    /// comparison downstream.
    pub fn is_well_formed(&self) -> bool {
        self.center.x.is_finite()
            && self.center.y.is_finite()
            && self.half_extent.is_finite()
            && self.half_extent >= 0.0
    }
}
