// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label placement demos for `vizir_labels`.
mod svg;

use kurbo::{Rect, Size};
use peniko::Color;
use peniko::color::palette::css;
use vizir_labels::{LabelPlanner, LabelSpec, Mark, MarkCollision, PlacementConfig, Placements};
use vizir_text::{FontWeight, HeuristicTextMeasurer, TextMeasurer, TextStyle};

const NAMES: [&str; 24] = [
    "Aberdeen", "Bergen", "Cork", "Dundee", "Esbjerg", "Faro", "Gdansk", "Hull", "Izmir",
    "Jena", "Kiel", "Lille", "Malmo", "Nantes", "Oulu", "Porto", "Quimper", "Riga", "Split",
    "Turku", "Umea", "Varna", "Wroclaw", "Zadar",
];

const PALETTE: [Color; 4] = [css::STEEL_BLUE, css::DARK_ORANGE, css::SEA_GREEN, css::PURPLE];

fn main() {
    let measurer = demo_measurer();

    let scatter = scatter_demo(measurer.as_ref());
    std::fs::write("vizir_labels_scatter.svg", scatter).expect("write vizir_labels_scatter.svg");
    println!("wrote vizir_labels_scatter.svg");

    let bubbles = bubble_demo(measurer.as_ref());
    std::fs::write("vizir_labels_bubbles.svg", bubbles).expect("write vizir_labels_bubbles.svg");
    println!("wrote vizir_labels_bubbles.svg");
}

fn demo_measurer() -> Box<dyn TextMeasurer> {
    Box::new(HeuristicTextMeasurer)
}

/// Deterministic pseudo-random sequence so the demo output is stable.
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

fn scatter_demo(measurer: &dyn TextMeasurer) -> String {
    // Grouped scatterplot: many small points, one label each.
    let plot_size = Size::new(480.0, 320.0);
    let font_size = 10.0;
    let mut rng = Lcg(7);

    let mut marks = Vec::new();
    let mut labels = Vec::new();
    for (i, name) in NAMES.iter().enumerate() {
        let x = 20.0 + rng.next_unit() * (plot_size.width - 40.0);
        let y = 20.0 + rng.next_unit() * (plot_size.height - 40.0);
        marks.push(Mark::circle(format!("p{i}"), (x, y), 3.5));
        labels.push(LabelSpec::new(*name).with_style(TextStyle::new(font_size)));
    }

    let mut planner = LabelPlanner::default();
    let placements = planner.plan(&marks, &labels, plot_size, measurer);
    report("scatter", &placements);

    let plot = Rect::from_origin_size((0.0, 0.0), plot_size);
    render(&marks, &labels, &placements, plot, font_size, false)
}

fn bubble_demo(measurer: &dyn TextMeasurer) -> String {
    // Bubble chart: large marks exclude more label area, so use exact geometry
    // and draw the label boxes for inspection.
    let plot_size = Size::new(480.0, 320.0);
    let font_size = 11.0;
    let mut rng = Lcg(42);

    let mut marks = Vec::new();
    let mut labels = Vec::new();
    for (i, name) in NAMES.iter().take(14).enumerate() {
        let r = 6.0 + rng.next_unit() * 22.0;
        let x = r + rng.next_unit() * (plot_size.width - 2.0 * r);
        let y = r + rng.next_unit() * (plot_size.height - 2.0 * r);
        marks.push(Mark::circle(format!("b{i}"), (x, y), r));
        labels.push(
            LabelSpec::new(*name)
                .with_style(TextStyle::new(font_size).with_weight(FontWeight::BOLD)),
        );
    }

    let config = PlacementConfig::default()
        .with_clearance(2.0)
        .with_mark_collision(MarkCollision::Exact);
    let placements = LabelPlanner::new(config).plan(&marks, &labels, plot_size, measurer);
    report("bubbles", &placements);

    let plot = Rect::from_origin_size((0.0, 0.0), plot_size);
    render(&marks, &labels, &placements, plot, font_size, true)
}

fn render(
    marks: &[Mark],
    labels: &[LabelSpec],
    placements: &Placements,
    plot: Rect,
    font_size: f64,
    outline_labels: bool,
) -> String {
    let mut scene = svg::SvgScene::new(plot, 20.0);
    for (i, mark) in marks.iter().enumerate() {
        scene.push_mark(mark, PALETTE[i % PALETTE.len()].with_alpha(0.7));
    }
    for ((mark, result), label) in marks.iter().zip(placements).zip(labels) {
        scene.push_label(mark, result, &label.text, font_size, css::BLACK);
        if outline_labels && result.visible {
            scene.push_outline(result.label_box.rect(), css::DARK_GRAY);
        }
    }
    scene.to_svg_string()
}

fn report(name: &str, placements: &Placements) {
    let hidden: Vec<&str> = placements.hidden().map(|r| r.mark_id.as_str()).collect();
    println!(
        "{name}: {} of {} labels visible; hidden: {hidden:?}",
        placements.visible_count(),
        placements.len()
    );
}
