// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy, order-dependent label placement.
//!
//! Marks are processed strictly in input order. For each mark the planner
//! measures its label, walks the candidate slots in priority order, and takes
//! the first slot that fits the plot and collides with nothing: no other mark
//! and no label that is already placed and visible. The decision is recorded
//! before the next mark is considered and is never revisited, so earlier marks
//! win contested slots.
//!
//! The result is a pure function of the mark order, label sizes, plot rectangle
//! and configuration. Callers that want labels to stay put across re-renders
//! must supply marks in a stable order (e.g. the original data order).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;
use vizir_text::{TextMeasurer, TextStyle};

use crate::candidate::{Candidate, Position, generate_for};
use crate::clamp::fits_within;
use crate::collision::{MarkCollision, collides};
use crate::geometry::{HorizontalAlign, LabelBox};
use crate::mark::{Mark, MarkId};
use crate::metrics::MetricsCache;

/// The text to place next to a mark, and the style used to measure it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSpec {
    /// Label text (unshaped, single line).
    pub text: String,
    /// Style used for measurement.
    pub style: TextStyle,
}

impl LabelSpec {
    /// Creates a label spec with the default text style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Sets the measurement style.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

/// Placement options.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Minimum gap between a mark's extent and its label.
    pub clearance: f64,
    /// Candidate slots in priority order.
    pub positions: SmallVec<[Position; 8]>,
    /// How labels are tested against other marks.
    pub mark_collision: MarkCollision,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            clearance: 3.0,
            positions: SmallVec::from_buf(Position::ALL),
            mark_collision: MarkCollision::CenterDistance,
        }
    }
}

impl PlacementConfig {
    /// Sets the label clearance. Negative values are treated as zero.
    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = if clearance.is_finite() {
            clearance.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Replaces the candidate slots and their priority order.
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    /// Sets the mark collision test.
    pub fn with_mark_collision(mut self, mark_collision: MarkCollision) -> Self {
        self.mark_collision = mark_collision;
        self
    }
}

/// The placement decision for one mark.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementResult {
    /// The mark this result belongs to.
    pub mark_id: MarkId,
    /// Horizontal offset from the mark center to the label reference point.
    pub dx: f64,
    /// Vertical offset from the mark center to the label reference point.
    pub dy: f64,
    /// How the label is anchored at the reference point.
    pub align: HorizontalAlign,
    /// Whether the renderer should draw the label.
    ///
    /// Hidden results still carry the geometry of the first candidate slot
    /// for diagnostics.
    pub visible: bool,
    /// The slot the geometry comes from.
    pub position: Position,
    /// The label box in plot coordinates (NaN for malformed marks).
    pub label_box: LabelBox,
}

impl PlacementResult {
    /// The absolute label reference point for `mark`.
    pub fn anchor(&self, mark: &Mark) -> Point {
        Point::new(mark.center.x + self.dx, mark.center.y + self.dy)
    }

    fn from_candidate(
        mark: &Mark,
        candidate: &Candidate,
        label: Size,
        label_box: LabelBox,
        visible: bool,
    ) -> Self {
        let anchor = candidate.anchor(label);
        Self {
            mark_id: mark.id.clone(),
            dx: anchor.x,
            dy: anchor.y,
            align: candidate.align,
            visible,
            position: candidate.position,
            label_box,
        }
    }
}

/// Placement results in input mark order, indexed by mark id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placements {
    results: Vec<PlacementResult>,
    index: HashMap<MarkId, usize>,
}

impl Placements {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn push(&mut self, result: PlacementResult) {
        let slot = self.results.len();
        // Duplicate ids keep their own results; lookup resolves to the first.
        self.index.entry(result.mark_id.clone()).or_insert(slot);
        self.results.push(result);
    }

    /// Looks up the result for a mark id.
    pub fn get(&self, id: &str) -> Option<&PlacementResult> {
        self.index.get(id).and_then(|&i| self.results.get(i))
    }

    /// Iterates results in input mark order.
    pub fn iter(&self) -> core::slice::Iter<'_, PlacementResult> {
        self.results.iter()
    }

    /// Results in input mark order.
    pub fn as_slice(&self) -> &[PlacementResult] {
        &self.results
    }

    /// Number of results (always equal to the number of marks planned).
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if no marks were planned.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of labels the renderer should draw.
    pub fn visible_count(&self) -> usize {
        self.results.iter().filter(|r| r.visible).count()
    }

    /// Iterates results whose labels must be suppressed.
    pub fn hidden(&self) -> impl Iterator<Item = &PlacementResult> {
        self.results.iter().filter(|r| !r.visible)
    }

    /// Consumes the placements, returning results in input mark order.
    pub fn into_vec(self) -> Vec<PlacementResult> {
        self.results
    }
}

impl<'a> IntoIterator for &'a Placements {
    type Item = &'a PlacementResult;
    type IntoIter = core::slice::Iter<'a, PlacementResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Label placement planner.
///
/// Owns the configuration and a measurement cache that persists across calls.
/// The cache only memoizes label sizes; it never changes a decision.
#[derive(Clone, Debug, Default)]
pub struct LabelPlanner {
    config: PlacementConfig,
    metrics: MetricsCache,
}

impl LabelPlanner {
    /// Creates a planner with the given configuration.
    pub fn new(config: PlacementConfig) -> Self {
        Self {
            config,
            metrics: MetricsCache::new(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Returns the measurement cache.
    pub fn metrics(&self) -> &MetricsCache {
        &self.metrics
    }

    /// Places one label per mark inside `[0, plot.width] × [0, plot.height]`.
    ///
    /// `labels[i]` belongs to `marks[i]`; marks without a label spec get an
    /// empty label.
    pub fn plan(
        &mut self,
        marks: &[Mark],
        labels: &[LabelSpec],
        plot: Size,
        measurer: &dyn TextMeasurer,
    ) -> Placements {
        self.plan_in(
            marks,
            labels,
            Rect::from_origin_size((0.0, 0.0), plot),
            measurer,
        )
    }

    /// Like [`LabelPlanner::plan`], for a plot rectangle not anchored at the origin.
    pub fn plan_in(
        &mut self,
        marks: &[Mark],
        labels: &[LabelSpec],
        plot: Rect,
        measurer: &dyn TextMeasurer,
    ) -> Placements {
        let default_label = LabelSpec::default();
        run(&self.config, marks, plot, |i, _mark| {
            let label = labels.get(i).unwrap_or(&default_label);
            self.metrics.label_size(measurer, &label.text, &label.style)
        })
    }

    /// Places labels whose text is derived from each mark, all in one style.
    pub fn plan_with<S: AsRef<str>>(
        &mut self,
        marks: &[Mark],
        mut label_text: impl FnMut(&Mark) -> S,
        style: &TextStyle,
        plot: Size,
        measurer: &dyn TextMeasurer,
    ) -> Placements {
        run(
            &self.config,
            marks,
            Rect::from_origin_size((0.0, 0.0), plot),
            |_i, mark| {
                let text = label_text(mark);
                self.metrics.label_size(measurer, text.as_ref(), style)
            },
        )
    }
}

/// Places labels with the default configuration and a fresh cache.
pub fn plan_all(
    marks: &[Mark],
    labels: &[LabelSpec],
    plot: Size,
    measurer: &dyn TextMeasurer,
) -> Placements {
    LabelPlanner::default().plan(marks, labels, plot, measurer)
}

fn run(
    config: &PlacementConfig,
    marks: &[Mark],
    plot: Rect,
    mut measure: impl FnMut(usize, &Mark) -> Size,
) -> Placements {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "label_plan",
        marks = marks.len(),
        plot_w = plot.width(),
        plot_h = plot.height()
    )
    .entered();

    let plot = plot.abs();
    let mut placements = Placements::with_capacity(marks.len());
    let mut placed: Vec<LabelBox> = Vec::with_capacity(marks.len());

    for (i, mark) in marks.iter().enumerate() {
        let label = measure(i, mark);
        let result = place_one(config, i, mark, label, marks, &placed, plot);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            mark = %mark.id,
            position = ?result.position,
            visible = result.visible,
            "label decided"
        );

        if result.visible {
            placed.push(result.label_box);
        }
        placements.push(result);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        visible = placed.len(),
        hidden = placements.len() - placed.len(),
        "label plan complete"
    );

    placements
}

fn place_one(
    config: &PlacementConfig,
    owner: usize,
    mark: &Mark,
    label: Size,
    marks: &[Mark],
    placed: &[LabelBox],
    plot: Rect,
) -> PlacementResult {
    let first = config.positions.first().copied().unwrap_or(Position::Right);

    if !mark.is_well_formed() {
        // Skip the search entirely; keep the reported offsets finite.
        let extent = if mark.half_extent.is_finite() {
            mark.half_extent.max(0.0)
        } else {
            0.0
        };
        let fallback = Candidate::new(first, 1, extent, label, config.clearance);
        let nan = LabelBox(Rect::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN));
        return PlacementResult::from_candidate(mark, &fallback, label, nan, false);
    }

    let candidates = generate_for(&config.positions, mark, label, config.clearance);
    for candidate in &candidates {
        let label_box = candidate.label_box(mark.center, label);
        if !fits_within(&label_box, plot) {
            continue;
        }
        if collides(&label_box, owner, marks, placed, config.mark_collision) {
            continue;
        }
        return PlacementResult::from_candidate(mark, candidate, label, label_box, true);
    }

    let fallback = Candidate::new(first, 1, mark.half_extent, label, config.clearance);
    let label_box = fallback.label_box(mark.center, label);
    PlacementResult::from_candidate(mark, &fallback, label, label_box, false)
}
