// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate label positions around a mark.
//!
//! Every mark gets the same priority-ordered set of offsets: lateral before
//! vertical, single-axis before diagonal. Each offset is computed so that the
//! label's near edge clears the mark's extent by the configured clearance.

use core::f64::consts::FRAC_1_SQRT_2;

use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;

use crate::geometry::{HorizontalAlign, LabelBox};
use crate::mark::Mark;

/// One of the eight label slots around a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// To the right of the mark, vertically centered.
    Right,
    /// Above the mark, horizontally centered.
    Top,
    /// To the left of the mark, vertically centered.
    Left,
    /// Below the mark, horizontally centered.
    Bottom,
    /// Above and to the right.
    TopRight,
    /// Above and to the left.
    TopLeft,
    /// Below and to the left.
    BottomLeft,
    /// Below and to the right.
    BottomRight,
}

impl Position {
    /// The default priority order.
    pub const ALL: [Self; 8] = [
        Self::Right,
        Self::Top,
        Self::Left,
        Self::Bottom,
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Alignment implied by the side the label sits on.
    pub fn align(self) -> HorizontalAlign {
        match self {
            Self::Right | Self::TopRight | Self::BottomRight => HorizontalAlign::Leading,
            Self::Left | Self::TopLeft | Self::BottomLeft => HorizontalAlign::Trailing,
            Self::Top | Self::Bottom => HorizontalAlign::Centered,
        }
    }

    /// Returns `true` for the four corner slots.
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::TopRight | Self::TopLeft | Self::BottomLeft | Self::BottomRight
        )
    }

    /// Unit signs of the offset; y grows downward.
    fn signs(self) -> (f64, f64) {
        match self {
            Self::Right => (1.0, 0.0),
            Self::Top => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Bottom => (0.0, 1.0),
            Self::TopRight => (1.0, -1.0),
            Self::TopLeft => (-1.0, -1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

/// A label offset option for one mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Which slot this is.
    pub position: Position,
    /// Offset from the mark center to the label box center.
    pub center: Vec2,
    /// How the renderer anchors the label text.
    pub align: HorizontalAlign,
    /// 1-based priority; lower is tried first.
    pub priority: u8,
}

impl Candidate {
    /// Builds the candidate for `position` around a mark of `half_extent`.
    pub fn new(
        position: Position,
        priority: u8,
        half_extent: f64,
        label: Size,
        clearance: f64,
    ) -> Self {
        let reach = half_extent + clearance;
        let (sx, sy) = position.signs();
        let (rx, ry) = if position.is_diagonal() {
            (reach * FRAC_1_SQRT_2, reach * FRAC_1_SQRT_2)
        } else {
            (reach, reach)
        };
        let center = Vec2::new(
            sx * (rx + 0.5 * label.width),
            sy * (ry + 0.5 * label.height),
        );
        Self {
            position,
            center,
            align: position.align(),
            priority,
        }
    }

    /// Offset from the mark center to the renderer's reference point.
    ///
    /// Leading labels are anchored at their left edge, trailing labels at their
    /// right edge, and both are vertically centered.
    pub fn anchor(&self, label: Size) -> Vec2 {
        Vec2::new(
            self.center.x + self.align.anchor_shift(label.width),
            self.center.y,
        )
    }

    /// The label box this candidate produces for a mark centered at `mark_center`.
    pub fn label_box(&self, mark_center: Point, label: Size) -> LabelBox {
        LabelBox::from_center(mark_center + self.center, label)
    }
}

/// Generates the eight default candidates for `mark` in priority order.
pub fn generate(mark: &Mark, label: Size, clearance: f64) -> [Candidate; 8] {
    let mut priority = 0_u8;
    Position::ALL.map(|position| {
        priority += 1;
        Candidate::new(position, priority, mark.half_extent, label, clearance)
    })
}

/// Generates candidates for a custom slot order.
///
/// Priorities follow the order of `positions`. Only the first 255 slots are
/// used; priorities are `u8`.
pub fn generate_for(
    positions: &[Position],
    mark: &Mark,
    label: Size,
    clearance: f64,
) -> SmallVec<[Candidate; 8]> {
    positions
        .iter()
        .zip(1..=u8::MAX)
        .map(|(&position, priority)| {
            Candidate::new(position, priority, mark.half_extent, label, clearance)
        })
        .collect()
}
