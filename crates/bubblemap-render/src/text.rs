use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
    /// Extra advance added after every character, in px.
    pub letter_spacing: f64,
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            bold: false,
            letter_spacing: 0.0,
            line_height: 1.5,
        }
    }
}

impl TextStyle {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn letter_spacing(mut self, px: f64) -> Self {
        self.letter_spacing = px;
        self
    }

    pub fn line_height(mut self, factor: f64) -> Self {
        self.line_height = factor;
        self
    }

    pub fn line_height_px(&self) -> f64 {
        self.font_size.max(1.0) * self.line_height
    }
}

pub trait TextMeasurer {
    fn line_width(&self, line: &str, style: &TextStyle) -> f64;
}

/// Width estimate from East Asian display widths. Stable across platforms; no font files.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub bold_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn line_width(&self, line: &str, style: &TextStyle) -> f64 {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.55
        } else {
            self.char_width_factor
        };
        let bold_factor = if self.bold_factor == 0.0 {
            1.08
        } else {
            self.bold_factor
        };

        let font_size = style.font_size.max(1.0);
        let mut cols = 0usize;
        let mut chars = 0usize;
        for ch in line.chars() {
            cols += ch.width().unwrap_or(0);
            chars += 1;
        }
        let mut width = cols as f64 * font_size * char_width_factor;
        if style.bold {
            width *= bold_factor;
        }
        width + chars as f64 * style.letter_spacing
    }
}

/// Greedy word wrap. Words wider than `max_width` are split between characters.
pub fn wrap_lines(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut cur = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if measurer.line_width(&candidate, style) <= max_width {
                cur = candidate;
                continue;
            }
            if !cur.is_empty() {
                out.push(std::mem::take(&mut cur));
            }
            if measurer.line_width(word, style) <= max_width {
                cur = word.to_string();
                continue;
            }
            for ch in word.chars() {
                cur.push(ch);
                if measurer.line_width(&cur, style) > max_width && cur.chars().count() > 1 {
                    cur.pop();
                    out.push(std::mem::take(&mut cur));
                    cur.push(ch);
                }
            }
        }
        out.push(cur);
    }
    out
}
