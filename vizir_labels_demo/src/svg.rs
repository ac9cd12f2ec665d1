// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `vizir_labels_demo`.

use kurbo::{Circle, Rect, Shape};
use peniko::Brush;
use vizir_labels::{HorizontalAlign, Mark, PlacementResult};

#[derive(Debug)]
enum Item {
    Mark {
        circle: Circle,
        fill: Brush,
    },
    Label {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        align: HorizontalAlign,
        fill: Brush,
    },
    Outline {
        rect: Rect,
        stroke: Brush,
    },
}

/// A flat list of primitives drawn in insertion order.
#[derive(Debug)]
pub(crate) struct SvgScene {
    view_box: Rect,
    plot: Rect,
    items: Vec<Item>,
}

impl SvgScene {
    pub(crate) fn new(plot: Rect, padding: f64) -> Self {
        Self {
            view_box: plot.inflate(padding, padding),
            plot,
            items: Vec::new(),
        }
    }

    pub(crate) fn push_mark(&mut self, mark: &Mark, fill: impl Into<Brush>) {
        self.items.push(Item::Mark {
            circle: Circle::new(mark.center, mark.half_extent),
            fill: fill.into(),
        });
    }

    /// Adds a label the way a renderer consumes placements: only when visible,
    /// at `mark + (dx, dy)` with the chosen alignment.
    pub(crate) fn push_label(
        &mut self,
        mark: &Mark,
        result: &PlacementResult,
        text: &str,
        font_size: f64,
        fill: impl Into<Brush>,
    ) {
        if !result.visible {
            return;
        }
        let anchor = result.anchor(mark);
        self.items.push(Item::Label {
            x: anchor.x,
            y: anchor.y,
            text: text.to_string(),
            font_size,
            align: result.align,
            fill: fill.into(),
        });
    }

    pub(crate) fn push_outline(&mut self, rect: Rect, stroke: impl Into<Brush>) {
        self.items.push(Item::Outline {
            rect,
            stroke: stroke.into(),
        });
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box;
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');
        out.push_str(&format!(
            r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="#cccccc"/>"##,
            self.plot.x0,
            self.plot.y0,
            self.plot.width(),
            self.plot.height()
        ));
        out.push('\n');

        for item in &self.items {
            match item {
                Item::Mark { circle, fill } => {
                    // This is used for demo purposes; real renderers pick the tolerance from
                    // the target device.
                    let d = circle.to_path(0.1).to_svg();
                    out.push_str(&format!(r#"<path d="{d}""#));
                    write_paint_attr(&mut out, "fill", fill);
                    out.push_str("/>\n");
                }
                Item::Label {
                    x,
                    y,
                    text,
                    font_size,
                    align,
                    fill,
                } => {
                    out.push_str(&format!(
                        r#"<text x="{x}" y="{y}" font-size="{font_size}" dominant-baseline="middle""#
                    ));
                    out.push_str(match align {
                        HorizontalAlign::Leading => r#" text-anchor="start""#,
                        HorizontalAlign::Centered => r#" text-anchor="middle""#,
                        HorizontalAlign::Trailing => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", fill);
                    out.push('>');
                    out.push_str(&escape_xml(text));
                    out.push_str("</text>\n");
                }
                Item::Outline { rect, stroke } => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke-width="0.5""#,
                        rect.x0,
                        rect.y0,
                        rect.width(),
                        rect.height(),
                    ));
                    write_paint_attr(&mut out, "stroke", stroke);
                    out.push_str("/>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
