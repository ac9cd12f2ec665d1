// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Memoized label measurement.
//!
//! Labels are measured once per `(text, style)` pair. A failed or nonsensical
//! measurement is replaced by a character-count estimate so one bad label
//! cannot stop the rest of a placement pass.

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;
use kurbo::Size;
use vizir_text::{StyleKey, TextMeasurer, TextMetrics, TextStyle};

/// A `(text, style) -> size` cache in front of a [`TextMeasurer`].
///
/// The cache needs `&mut` access, so sharing one across threads requires the
/// caller to wrap it (or, more simply, give each planner its own).
#[derive(Clone, Debug, Default)]
pub struct MetricsCache {
    sizes: HashMap<StyleKey, HashMap<String, Size>>,
    fallbacks: usize,
}

impl MetricsCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the measured `(width, line height)` of `text` in `style`.
    pub fn label_size(
        &mut self,
        measurer: &dyn TextMeasurer,
        text: &str,
        style: &TextStyle,
    ) -> Size {
        let key = style.key();
        if let Some(size) = self.sizes.get(&key).and_then(|by_text| by_text.get(text)) {
            return *size;
        }

        let metrics = match measurer.measure(text, style).and_then(TextMetrics::validate) {
            Ok(metrics) => metrics,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    text,
                    font_size = style.font_size,
                    error = %_err,
                    "label measurement failed; using estimate"
                );
                self.fallbacks += 1;
                TextMetrics::estimate(text, style.font_size)
            }
        };
        let size = Size::new(metrics.advance_width, metrics.line_height());
        self.sizes
            .entry(key)
            .or_default()
            .insert(String::from(text), size);
        size
    }

    /// Number of distinct `(text, style)` pairs measured so far.
    pub fn len(&self) -> usize {
        self.sizes.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing has been measured yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of measurements that fell back to the estimate.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// Drops every cached size.
    pub fn clear(&mut self) {
        self.sizes.clear();
        self.fallbacks = 0;
    }
}
