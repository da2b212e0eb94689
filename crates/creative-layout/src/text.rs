//! Text measurement for layout.
//!
//! Text layers often arrive without explicit dimensions. Their box is
//! estimated from the character count and font size; no font metrics are
//! consulted.

use serde::{Deserialize, Serialize};

/// Factors of the character-count size heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextMetricsOptions {
    /// Average glyph advance as a fraction of the font size
    pub char_width_factor: f64,
    /// Average glyph advance for bold text
    pub bold_char_width_factor: f64,
    /// Extra horizontal room applied to the whole line
    pub width_padding: f64,
    /// Line height as a multiplier of the font size
    pub line_height: f64,
}

impl Default for TextMetricsOptions {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
            bold_char_width_factor: 0.65,
            width_padding: 1.2,
            line_height: 1.5,
        }
    }
}

/// Text measurement configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: f64,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            bold: false,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }
}

/// Estimated text box, rounded to whole pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

/// Measure single-line text with the default heuristic.
pub fn measure_text(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text_with(text, style, &TextMetricsOptions::default())
}

/// Measure single-line text.
///
/// `width = round(chars * font_size * factor * padding)`,
/// `height = round(font_size * line_height)` where `factor` depends on weight.
pub fn measure_text_with(text: &str, style: &TextStyle, options: &TextMetricsOptions) -> TextMetrics {
    let char_count = text.chars().count() as f64;
    let factor = if style.bold {
        options.bold_char_width_factor
    } else {
        options.char_width_factor
    };

    TextMetrics {
        width: (char_count * style.font_size * factor * options.width_padding).round(),
        height: (style.font_size * options.line_height).round(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_regular_text() {
        let metrics = measure_text("BUY NOW", &TextStyle::new(20.0));
        assert_eq!(metrics.width, 101.0);
        assert_eq!(metrics.height, 30.0);
    }

    #[test]
    fn test_measure_bold_text() {
        // 5 * 20 * 0.65 * 1.2 = 78
        let metrics = measure_text("Hello", &TextStyle::new(20.0).bold(true));
        assert_eq!(metrics.width, 78.0);
        assert_eq!(metrics.height, 30.0);
    }

    #[test]
    fn test_measure_empty_text() {
        let metrics = measure_text("", &TextStyle::new(16.0));
        assert_eq!(metrics.width, 0.0);
        assert_eq!(metrics.height, 24.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let ascii = measure_text("cafe", &TextStyle::new(10.0));
        let accented = measure_text("café", &TextStyle::new(10.0));
        assert_eq!(ascii, accented);
    }

    #[test]
    fn test_custom_factors() {
        let options = TextMetricsOptions {
            char_width_factor: 0.5,
            width_padding: 1.0,
            line_height: 1.0,
            ..Default::default()
        };
        let metrics = measure_text_with("abcd", &TextStyle::new(10.0), &options);
        assert_eq!(metrics.width, 20.0);
        assert_eq!(metrics.height, 10.0);
    }
}
