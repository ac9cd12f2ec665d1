// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label layout.
//!
//! Label placement needs the rendered extent of every label before it can decide
//! where that label goes. `VizIR` keeps shaping and glyph layout downstream, so
//! placement code depends on a tiny, fallible text measurement interface that
//! can be called without a live rendering surface.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (shaping engines, web canvas measurement and plain
//!   heuristics can all implement the same trait).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

/// A minimal text measurement interface used by label placement.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate),
/// - backed by a shaping engine, or
/// - backed by web platform text measurement (e.g. HTML canvas).
///
/// Measurement is allowed to fail. Callers are expected to substitute an
/// estimate (see [`TextMetrics::estimate`]) rather than abort a whole layout
/// pass because of a single label.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError> {
        (**self).measure(text, style)
    }
}

/// Errors reported by a [`TextMeasurer`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MeasureError {
    /// The backend could not measure the text (missing font, no context, ...).
    #[error("text measurement backend unavailable: {0}")]
    Unavailable(&'static str),
    /// The backend returned metrics that cannot describe a real extent.
    #[error("invalid text metrics: width {width}, height {height}")]
    InvalidMetrics {
        /// The reported advance width.
        width: f64,
        /// The reported line height.
        height: f64,
    },
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: family, size, weight and style are enough to
/// make label extents consistent.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the chart’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }

    /// Sets the font style.
    #[must_use]
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Returns a hashable key identifying this style for memoization.
    ///
    /// The font size is keyed by its bit pattern, so `0.0` and `-0.0` are
    /// distinct keys. That only costs a redundant measurement.
    #[must_use]
    pub fn key(&self) -> StyleKey {
        StyleKey {
            font_size_bits: self.font_size.to_bits(),
            font_family: self.font_family.clone(),
            font_weight: self.font_weight,
            font_style: self.font_style,
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// A hashable identity for a [`TextStyle`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StyleKey {
    font_size_bits: u64,
    font_family: FontFamily,
    font_weight: FontWeight,
    font_style: FontStyle,
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Character-count estimate used when no real measurement is available.
    ///
    /// Assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
    #[must_use]
    pub fn estimate(text: &str, font_size: f64) -> Self {
        let font_size = if font_size.is_finite() {
            font_size.max(0.0)
        } else {
            0.0
        };
        Self {
            advance_width: 0.6 * font_size * text.chars().count() as f64,
            ascent: 0.8 * font_size,
            descent: 0.2 * font_size,
            leading: 0.0,
        }
    }

    /// Checks that these metrics describe a finite, non-negative extent.
    pub fn validate(self) -> Result<Self, MeasureError> {
        let width = self.advance_width;
        let height = self.line_height();
        if width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0 {
            Ok(self)
        } else {
            Err(MeasureError::InvalidMetrics { width, height })
        }
    }
}

/// A tiny heuristic text measurer suitable for demos and tests.
///
/// This never fails; it is [`TextMetrics::estimate`] behind the trait.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, MeasureError> {
        Ok(TextMetrics::estimate(text, style.font_size))
    }
}
