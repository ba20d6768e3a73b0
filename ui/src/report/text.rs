//! Text measurement for page composition.
//!
//! SVG has no flow layout, so the composer wraps text itself. Widths are
//! estimated from per-character classes tuned against a generic sans-serif
//! face; the estimate errs wide so wrapped lines never overflow their box.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    SemiBold,
    Bold,
}

impl FontWeight {
    pub fn svg_value(self) -> &'static str {
        match self {
            FontWeight::Regular => "400",
            FontWeight::SemiBold => "600",
            FontWeight::Bold => "700",
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontWeight::Regular => "Regular",
            FontWeight::SemiBold => "SemiBold",
            FontWeight::Bold => "Bold",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Vertical advance between consecutive baselines.
    pub line_h: f64,
    /// Distance from the top of the line box to the baseline.
    pub asc: f64,
    pub desc: f64,
}

pub fn metrics(size_px: f64, line_height: f64) -> TextMetrics {
    let line_h = (size_px * line_height).round();
    let asc = (size_px * 0.92).round();
    let desc = (line_h - asc).max(size_px * 0.08).round();
    TextMetrics { line_h, asc, desc }
}

fn char_em(ch: char) -> f64 {
    match ch {
        'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | ' ' => 0.36,
        'm' | 'w' | 'M' | 'W' | '%' | '@' => 0.86,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_digit() => 0.58,
        c if c.is_ascii() => 0.54,
        _ => 1.0,
    }
}

pub fn advance_width(text: &str, weight: FontWeight, size_px: f64) -> f64 {
    let factor = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::SemiBold => 1.05,
        FontWeight::Bold => 1.08,
    };
    text.chars().map(char_em).sum::<f64>() * size_px * factor
}

/// Greedy word wrap. Words longer than a whole line are split by character.
pub fn wrap(text: &str, max_width: f64, weight: FontWeight, size_px: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if advance_width(&candidate, weight, size_px) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if advance_width(word, weight, size_px) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if advance_width(&current, weight, size_px) > max_width {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
