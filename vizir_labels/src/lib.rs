// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Automatic label placement for point-like chart marks.
//!
//! Scatterplots and bubble charts want a text label next to each mark, without
//! labels covering other marks, each other, or spilling out of the plot. This
//! crate picks a slot for every label:
//! - **Candidates**: eight fixed offsets around the mark (right, top, left,
//!   bottom, then the diagonals), each clearing the mark's extent.
//! - **Clamp**: a candidate must lie entirely inside the plot rectangle.
//! - **Collisions**: a candidate must not intrude on any other mark or overlap a
//!   label that is already placed and visible.
//! - **Planner**: marks are processed greedily in input order; the first
//!   admissible candidate wins, and marks with no free slot are hidden.
//!
//! The output is one [`PlacementResult`] per mark. Renderers draw the label at
//! `mark.center + (dx, dy)` with the given alignment, and only when `visible`
//! is set; they never re-run collision logic.
//!
//! Text measurement goes through [`vizir_text::TextMeasurer`] and is memoized
//! per `(text, style)`.

#![no_std]

extern crate alloc;

mod candidate;
mod clamp;
mod collision;
#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod mark;
mod metrics;
mod planner;
#[cfg(test)]
mod planner_tests;

pub use candidate::{Candidate, Position, generate, generate_for};
pub use clamp::{fits, fits_within};
pub use collision::{MarkCollision, collides, first_label_hit, first_mark_hit};
pub use geometry::{HorizontalAlign, LabelBox};
pub use mark::{Mark, MarkId};
pub use metrics::MetricsCache;
pub use planner::{
    LabelPlanner, LabelSpec, PlacementConfig, PlacementResult, Placements, plan_all,
};
