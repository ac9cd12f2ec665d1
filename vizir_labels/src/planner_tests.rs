// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use vizir_text::{HeuristicTextMeasurer, MeasureError, TextMeasurer, TextMetrics, TextStyle};

use crate::{
    LabelPlanner, LabelSpec, Mark, MarkCollision, PlacementConfig, Placements, Position, fits,
    generate, plan_all,
};

fn labels(texts: &[&str], font_size: f64) -> Vec<LabelSpec> {
    texts
        .iter()
        .map(|t| LabelSpec::new(*t).with_style(TextStyle::new(font_size)))
        .collect()
}

fn assert_no_visible_overlaps(placements: &Placements) {
    let visible: Vec<_> = placements.iter().filter(|r| r.visible).collect();
    for (i, a) in visible.iter().enumerate() {
        for b in &visible[i + 1..] {
            assert!(
                !a.label_box.overlaps(&b.label_box),
                "{} and {} overlap",
                a.mark_id,
                b.mark_id
            );
        }
    }
}

/// Tiny deterministic generator so scenario layouts are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

#[test]
fn distant_marks_both_take_the_right_slot() {
    let marks = vec![
        Mark::circle("a", (50.0, 50.0), 4.0),
        Mark::circle("b", (500.0, 500.0), 4.0),
    ];
    let placements = plan_all(
        &marks,
        &labels(&["A", "B"], 12.0),
        Size::new(600.0, 600.0),
        &HeuristicTextMeasurer,
    );

    assert_eq!(placements.len(), 2, "one result per mark");
    for id in ["a", "b"] {
        let r = placements.get(id).expect("result for every id");
        assert!(r.visible, "{id} should be visible");
        assert_eq!(r.position, Position::Right, "{id} should use the first slot");
        assert!((r.dx - 7.0).abs() < 1e-9, "leading anchor sits at extent + clearance");
        assert_eq!(r.dy, 0.0, "right slot is vertically centered");
    }
}

#[test]
fn nearly_coincident_marks_push_the_second_label_elsewhere() {
    let marks = vec![
        Mark::circle("first", (104.0, 100.0), 8.0),
        Mark::circle("second", (100.0, 100.0), 8.0),
    ];
    let placements = plan_all(
        &marks,
        &labels(&["Label A", "Label B"], 12.0),
        Size::new(600.0, 600.0),
        &HeuristicTextMeasurer,
    );

    let first = placements.get("first").expect("first placed");
    let second = placements.get("second").expect("second placed");
    assert!(first.visible, "first mark gets its pick");
    assert_eq!(first.position, Position::Right, "first mark keeps the right slot");
    assert_ne!(
        second.position,
        Position::Right,
        "second mark's right slot runs into the first mark"
    );
    if second.visible {
        assert!(
            !second.label_box.overlaps(&first.label_box),
            "a visible fallback must not overlap"
        );
    }
    assert_no_visible_overlaps(&placements);
}

#[test]
fn coincident_marks_in_data_order_block_the_first_right_slot() {
    // Every mark is an obstacle from the start, so the first mark's right slot
    // already runs into the second mark; the second then takes the right slot.
    let marks = vec![
        Mark::circle("first", (100.0, 100.0), 8.0),
        Mark::circle("second", (104.0, 100.0), 8.0),
    ];
    let texts = labels(&["Label A", "Label B"], 12.0);
    let plot = Size::new(600.0, 600.0);

    for (mode, first_slot) in [
        (MarkCollision::CenterDistance, Position::Left),
        (MarkCollision::Exact, Position::Top),
    ] {
        let config = PlacementConfig::default().with_mark_collision(mode);
        let placements =
            LabelPlanner::new(config).plan(&marks, &texts, plot, &HeuristicTextMeasurer);
        let first = placements.get("first").expect("first placed");
        let second = placements.get("second").expect("second placed");
        assert!(first.visible, "{mode:?}: first mark finds a later slot");
        assert_eq!(first.position, first_slot, "{mode:?}: first mark falls through");
        assert!(second.visible, "{mode:?}: second mark is visible");
        assert_eq!(second.position, Position::Right, "{mode:?}: right slot is free again");
        assert_no_visible_overlaps(&placements);
    }
}

#[test]
fn corner_mark_only_fits_toward_positive_space() {
    let mark = Mark::circle("corner", (2.0, 2.0), 3.0);
    let plot = Size::new(600.0, 600.0);
    let style = TextStyle::new(12.0);
    let label = HeuristicTextMeasurer.measure("wide label", &style).unwrap();
    let label = Size::new(label.advance_width, label.line_height());
    assert!(label.width > 4.0, "label must be wider than the margin");

    for c in generate(&mark, label, 3.0) {
        let fits_plot = fits(&c.label_box(mark.center, label), plot);
        assert_eq!(
            fits_plot,
            c.position == Position::BottomRight,
            "{:?} fit check",
            c.position
        );
    }

    let placements = plan_all(
        &[mark],
        &[LabelSpec::new("wide label").with_style(style)],
        plot,
        &HeuristicTextMeasurer,
    );
    let r = placements.get("corner").expect("corner placed");
    assert!(r.visible, "bottom-right is free");
    assert_eq!(r.position, Position::BottomRight, "only viable slot");
}

#[test]
fn well_spaced_marks_are_all_visible() {
    let mut rng = Lcg(0x5eed);
    let mut marks = Vec::new();
    let mut texts = Vec::new();
    for i in 0..50_u32 {
        let col = f64::from(i % 10);
        let row = f64::from(i / 10);
        let jitter_x = (rng.next_unit() - 0.5) * 30.0;
        let jitter_y = (rng.next_unit() - 0.5) * 30.0;
        marks.push(Mark::circle(
            format!("p{i}"),
            (50.0 + 100.0 * col + jitter_x, 60.0 + 120.0 * row + jitter_y),
            4.0,
        ));
        texts.push(LabelSpec::new(format!("p{i}")).with_style(TextStyle::new(10.0)));
    }

    let placements = plan_all(
        &marks,
        &texts,
        Size::new(1000.0, 600.0),
        &HeuristicTextMeasurer,
    );
    assert_eq!(placements.len(), 50, "one result per mark");
    assert_eq!(placements.visible_count(), 50, "nothing should be hidden");
    assert_no_visible_overlaps(&placements);
}

#[test]
fn marks_at_minimum_spacing_are_all_visible() {
    // Rejection-sample 50 marks no closer than 4 × half extent.
    const HALF_EXTENT: f64 = 4.0;
    let plot = Size::new(600.0, 600.0);
    for seed in [0x5eed, 1, 2, 3, 7, 99] {
        let mut rng = Lcg(seed);
        let mut marks: Vec<Mark> = Vec::new();
        while marks.len() < 50 {
            let center = kurbo::Point::new(
                rng.next_unit() * plot.width,
                rng.next_unit() * plot.height,
            );
            if marks
                .iter()
                .all(|m| (m.center - center).hypot() >= 4.0 * HALF_EXTENT)
            {
                marks.push(Mark::circle(format!("p{}", marks.len()), center, HALF_EXTENT));
            }
        }
        let texts: Vec<LabelSpec> = marks
            .iter()
            .map(|m| LabelSpec::new(m.id.as_str()).with_style(TextStyle::new(10.0)))
            .collect();

        for mode in [MarkCollision::CenterDistance, MarkCollision::Exact] {
            let config = PlacementConfig::default().with_mark_collision(mode);
            let placements =
                LabelPlanner::new(config).plan(&marks, &texts, plot, &HeuristicTextMeasurer);
            assert_eq!(
                placements.visible_count(),
                50,
                "seed {seed}, {mode:?}: nothing should be hidden"
            );
            assert_no_visible_overlaps(&placements);
        }
    }
}

#[test]
fn earlier_marks_win_contested_slots() {
    let a = Mark::circle("a", (100.0, 100.0), 2.0);
    let b = Mark::circle("b", (100.0, 108.0), 2.0);
    let texts = labels(&["aaaaa", "bbbbb"], 10.0);
    let plot = Size::new(600.0, 600.0);

    let forward = plan_all(&[a.clone(), b.clone()], &texts, plot, &HeuristicTextMeasurer);
    assert_eq!(forward.get("a").map(|r| r.position), Some(Position::Right), "a first");
    assert_ne!(forward.get("b").map(|r| r.position), Some(Position::Right), "b yields");

    let reversed_texts = labels(&["bbbbb", "aaaaa"], 10.0);
    let reversed = plan_all(&[b, a], &reversed_texts, plot, &HeuristicTextMeasurer);
    assert_eq!(reversed.get("b").map(|r| r.position), Some(Position::Right), "b first");
    assert_ne!(reversed.get("a").map(|r| r.position), Some(Position::Right), "a yields");
}

#[test]
fn hidden_results_carry_the_first_slot_geometry() {
    let marks = vec![Mark::circle("m", (5.0, 5.0), 2.0)];
    let placements = plan_all(
        &marks,
        &labels(&["far too wide for this plot"], 12.0),
        Size::new(10.0, 10.0),
        &HeuristicTextMeasurer,
    );
    let r = placements.get("m").expect("hidden marks still get a result");
    assert!(!r.visible, "no slot fits");
    assert_eq!(r.position, Position::Right, "diagnostic geometry is the right slot");
    assert!((r.dx - 5.0).abs() < 1e-9, "anchor at extent + clearance");
    assert_eq!(placements.hidden().count(), 1, "reported as hidden");
}

#[test]
fn malformed_marks_are_hidden_without_disturbing_others() {
    let marks = vec![
        Mark::circle("nan", (f64::NAN, 10.0), 3.0),
        Mark::circle("ok", (100.0, 100.0), 3.0),
        Mark::circle("inf", (50.0, f64::INFINITY), 3.0),
    ];
    let placements = plan_all(
        &marks,
        &labels(&["x", "y", "z"], 12.0),
        Size::new(300.0, 300.0),
        &HeuristicTextMeasurer,
    );
    assert_eq!(placements.len(), 3, "every mark gets a result");
    assert!(!placements.get("nan").expect("nan").visible, "NaN is hidden");
    assert!(!placements.get("inf").expect("inf").visible, "infinity is hidden");
    let ok = placements.get("ok").expect("ok");
    assert!(ok.visible, "healthy mark unaffected");
    assert_eq!(ok.position, Position::Right, "healthy mark takes its first slot");
    assert!(
        placements.get("nan").expect("nan").dx.is_finite(),
        "diagnostic offsets stay finite"
    );
}

struct FailingMeasurer;

impl TextMeasurer for FailingMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError> {
        if text.starts_with('!') {
            Err(MeasureError::Unavailable("font missing"))
        } else {
            HeuristicTextMeasurer.measure(text, style)
        }
    }
}

#[test]
fn measurement_failures_do_not_abort_the_pass() {
    let marks = vec![
        Mark::circle("a", (50.0, 50.0), 3.0),
        Mark::circle("b", (200.0, 200.0), 3.0),
    ];
    let mut planner = LabelPlanner::default();
    let placements = planner.plan(
        &marks,
        &labels(&["!broken", "fine"], 12.0),
        Size::new(400.0, 400.0),
        &FailingMeasurer,
    );
    assert_eq!(placements.visible_count(), 2, "both labels still placed");
    assert_eq!(planner.metrics().fallbacks(), 1, "one estimate was used");
    let a = placements.get("a").expect("a");
    assert!(
        (a.label_box.rect().width() - 0.6 * 12.0 * 7.0).abs() < 1e-9,
        "fallback width is the char-count estimate"
    );
}

#[test]
fn runs_are_deterministic_and_cache_is_transparent() {
    let marks: Vec<_> = (0..20_u32)
        .map(|i| {
            let t = f64::from(i);
            Mark::circle(format!("m{i}"), (40.0 + 13.0 * t, 30.0 + 7.0 * t), 5.0)
        })
        .collect();
    let texts: Vec<_> = (0..20).map(|i| LabelSpec::new(format!("mark {i}"))).collect();
    let plot = Size::new(320.0, 200.0);

    let mut planner = LabelPlanner::default();
    let first = planner.plan(&marks, &texts, plot, &HeuristicTextMeasurer);
    let warm = planner.plan(&marks, &texts, plot, &HeuristicTextMeasurer);
    let cold = plan_all(&marks, &texts, plot, &HeuristicTextMeasurer);
    assert_eq!(first, warm, "warm cache gives identical results");
    assert_eq!(first, cold, "independent runs give identical results");
    assert_no_visible_overlaps(&first);
}

#[test]
fn missing_label_specs_become_empty_labels() {
    let marks = vec![
        Mark::circle("a", (50.0, 50.0), 3.0),
        Mark::circle("b", (150.0, 50.0), 3.0),
    ];
    let placements = plan_all(
        &marks,
        &labels(&["only a"], 12.0),
        Size::new(300.0, 100.0),
        &HeuristicTextMeasurer,
    );
    assert_eq!(placements.len(), 2, "unlabelled marks still get a result");
    let b = placements.get("b").expect("b");
    assert_eq!(b.label_box.rect().width(), 0.0, "empty label has no width");
}

#[test]
fn plan_with_derives_text_from_marks() {
    let marks = vec![
        Mark::square("north", (100.0, 20.0), 6.0),
        Mark::square("south", (100.0, 180.0), 6.0),
    ];
    let mut planner = LabelPlanner::default();
    let placements = planner.plan_with(
        &marks,
        |m| String::from(m.id.as_str()),
        &TextStyle::new(10.0),
        Size::new(200.0, 200.0),
        &HeuristicTextMeasurer,
    );
    assert_eq!(placements.visible_count(), 2, "both fit");
    assert_eq!(planner.metrics().len(), 2, "one measurement per distinct text");
    let north = placements.get("north").expect("north");
    assert!(
        (north.label_box.rect().width() - 30.0).abs() < 1e-9,
        "width from the id text"
    );
}

#[test]
fn inset_plot_rectangles_clamp_labels() {
    let marks = vec![Mark::circle("edge", (290.0, 200.0), 2.0)];
    let mut planner = LabelPlanner::default();
    let placements = planner.plan_in(
        &marks,
        &labels(&["aaaaa"], 10.0),
        Rect::new(100.0, 100.0, 300.0, 300.0),
        &HeuristicTextMeasurer,
    );
    let r = placements.get("edge").expect("edge");
    assert!(r.visible, "left side is free");
    assert_eq!(r.position, Position::Left, "right and top cross the plot edge");
    assert!((r.dx + 5.0).abs() < 1e-9, "trailing anchor at extent + clearance");
}

#[test]
fn custom_positions_restrict_the_search() {
    let marks = vec![Mark::circle("m", (100.0, 100.0), 4.0)];
    let texts = labels(&["m"], 12.0);
    let plot = Size::new(200.0, 200.0);

    let config = PlacementConfig::default().with_positions([Position::Bottom, Position::Left]);
    let placements = LabelPlanner::new(config).plan(&marks, &texts, plot, &HeuristicTextMeasurer);
    assert_eq!(
        placements.get("m").map(|r| r.position),
        Some(Position::Bottom),
        "first configured slot wins"
    );

    let none = PlacementConfig::default().with_positions(Vec::new());
    let placements = LabelPlanner::new(none).plan(&marks, &texts, plot, &HeuristicTextMeasurer);
    let r = placements.get("m").expect("m");
    assert!(!r.visible, "no slots means hidden");
    assert_eq!(r.position, Position::Right, "diagnostics fall back to the right slot");
}

#[test]
fn oversized_position_lists_do_not_overflow_priorities() {
    let marks = vec![Mark::circle("m", (100.0, 100.0), 4.0)];
    let texts = labels(&["m"], 12.0);
    let config =
        PlacementConfig::default().with_positions(core::iter::repeat_n(Position::Right, 300));
    let placements = LabelPlanner::new(config).plan(
        &marks,
        &texts,
        Size::new(200.0, 200.0),
        &HeuristicTextMeasurer,
    );
    let r = placements.get("m").expect("m");
    assert!(r.visible, "repeated right slot is still free");
    assert_eq!(r.position, Position::Right, "right slot chosen");
}

#[test]
fn exact_mark_collision_admits_slots_the_bound_rejects() {
    // A big bubble sits just below-right of a small point's right slot.
    let marks = vec![
        Mark::circle("point", (100.0, 100.0), 2.0),
        Mark::circle("bubble", (125.0, 128.0), 20.0),
    ];
    let texts = labels(&["aaaaa", ""], 10.0);
    let plot = Size::new(400.0, 400.0);

    let bound = plan_all(&marks, &texts, plot, &HeuristicTextMeasurer);
    assert_ne!(
        bound.get("point").map(|r| r.position),
        Some(Position::Right),
        "the conservative bound rejects the right slot"
    );

    let exact = PlacementConfig::default().with_mark_collision(MarkCollision::Exact);
    let exact = LabelPlanner::new(exact).plan(&marks, &texts, plot, &HeuristicTextMeasurer);
    assert_eq!(
        exact.get("point").map(|r| r.position),
        Some(Position::Right),
        "exact geometry sees the gap"
    );
}

#[test]
fn duplicate_ids_keep_one_result_per_mark() {
    let marks = vec![
        Mark::circle("dup", (50.0, 50.0), 3.0),
        Mark::circle("dup", (250.0, 250.0), 3.0),
    ];
    let placements = plan_all(
        &marks,
        &labels(&["one", "two"], 12.0),
        Size::new(400.0, 400.0),
        &HeuristicTextMeasurer,
    );
    assert_eq!(placements.len(), 2, "one result per mark, not per id");
    let first = placements.get("dup").expect("dup");
    assert_eq!(first, &placements.as_slice()[0], "lookup resolves to the first");
}
