// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collision tests for a candidate label box.
//!
//! A candidate collides if it comes too close to any mark other than its own,
//! or if it overlaps a label that has already been placed and is visible.
//! Hidden labels are never passed in as obstacles.

use kurbo::Point;

use crate::geometry::LabelBox;
use crate::mark::Mark;

/// How a label box is tested against other marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MarkCollision {
    /// Conservative center-distance bound.
    ///
    /// The label box is replaced by its circumscribed circle and the mark by a
    /// circle of radius `half_extent`; the two collide if the circles intersect.
    /// This never misses a real overlap but rejects some free slots near
    /// large marks.
    #[default]
    CenterDistance,
    /// Exact circle-vs-rectangle intersection against `half_extent`.
    Exact,
}

impl MarkCollision {
    /// Returns `true` if `label_box` intrudes on `mark`.
    pub fn hits(self, label_box: &LabelBox, mark: &Mark) -> bool {
        if !mark.is_well_formed() {
            return false;
        }
        match self {
            Self::CenterDistance => {
                let d = label_box.center() - mark.center;
                d.hypot() < mark.half_extent + label_box.half_diagonal()
            }
            Self::Exact => {
                contains(label_box, mark.center)
                    || label_box.distance_to(mark.center) < mark.half_extent
            }
        }
    }
}

fn contains(label_box: &LabelBox, p: Point) -> bool {
    let r = label_box.rect();
    p.x > r.x0 && p.x < r.x1 && p.y > r.y0 && p.y < r.y1
}

/// Index of the first mark (other than `owner`) that `label_box` intrudes on.
pub fn first_mark_hit(
    label_box: &LabelBox,
    owner: usize,
    marks: &[Mark],
    mode: MarkCollision,
) -> Option<usize> {
    marks
        .iter()
        .enumerate()
        .find(|&(i, mark)| i != owner && mode.hits(label_box, mark))
        .map(|(i, _)| i)
}

/// Index of the first placed label that `label_box` overlaps.
pub fn first_label_hit(label_box: &LabelBox, placed: &[LabelBox]) -> Option<usize> {
    placed.iter().position(|other| label_box.overlaps(other))
}

/// Returns `true` if `label_box` collides with another mark or a placed label.
///
/// `owner` is the index of the mark the label belongs to; its own shape is
/// excluded. `placed` must contain only visible label boxes.
pub fn collides(
    label_box: &LabelBox,
    owner: usize,
    marks: &[Mark],
    placed: &[LabelBox],
    mode: MarkCollision,
) -> bool {
    first_mark_hit(label_box, owner, marks, mode).is_some()
        || first_label_hit(label_box, placed).is_some()
}
