//! Colour normalization ahead of rasterization.
//!
//! The rasterizers only understand hex, `rgb()`/`rgba()`, `hsl()` and named
//! colours. Any function from the newer CSS colour syntaxes found inside a tag
//! is replaced wholesale by a fallback. Text nodes are left alone.

pub const FALLBACK_COLOR: &str = "#000000";

pub const UNSUPPORTED_FUNCTIONS: [&str; 6] =
    ["oklch(", "oklab(", "lch(", "lab(", "color-mix(", "color("];

fn unsupported_at(s: &str) -> Option<&'static str> {
    UNSUPPORTED_FUNCTIONS
        .iter()
        .copied()
        .find(|name| {
            s.get(..name.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
        })
}

/// Length of a balanced `name(...)` call starting at the beginning of `s`.
fn call_len(s: &str, name_len: usize) -> usize {
    let mut depth = 0usize;
    for (idx, ch) in s.char_indices().skip(name_len - 1) {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx + 1;
                }
            }
            '>' => return idx,
            _ => {}
        }
    }
    s.len()
}

pub fn contains_unsupported(markup: &str) -> bool {
    let lower = markup.to_ascii_lowercase();
    UNSUPPORTED_FUNCTIONS.iter().any(|name| lower.contains(name))
}

pub fn sanitize_colors(markup: &str) -> String {
    if !contains_unsupported(markup) {
        return markup.to_string();
    }
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    let mut idx = 0;
    while idx < markup.len() {
        let rest = &markup[idx..];
        if in_tag {
            // Identifier boundary in the input, not the output: `rgba(` never
            // looks like `lab(`, and a call right after a replaced one still matches.
            let boundary = markup[..idx]
                .chars()
                .next_back()
                .map(|c| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(true);
            if boundary {
                if let Some(name) = unsupported_at(rest) {
                    out.push_str(FALLBACK_COLOR);
                    idx += call_len(rest, name.len());
                    continue;
                }
            }
        }
        let Some(ch) = rest.chars().next() else {
            break;
        };
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ => {}
        }
        out.push(ch);
        idx += ch.len_utf8();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_markup_is_untouched() {
        let svg = r##"<rect fill="#2563EB" stroke="rgba(0,0,0,0.1)"/>"##;
        assert_eq!(sanitize_colors(svg), svg);
    }

    #[test]
    fn modern_functions_are_replaced() {
        let svg = r#"<rect fill="oklch(0.62 0.19 259.8)" style="stroke: color-mix(in srgb, red 50%, blue)"/>"#;
        assert_eq!(
            sanitize_colors(svg),
            r##"<rect fill="#000000" style="stroke: #000000"/>"##
        );
    }

    #[test]
    fn adjacent_calls_are_each_replaced() {
        let svg = r#"<rect fill="oklch(0.5 0.1 200)lab(50 0 0)"/>"#;
        assert_eq!(
            sanitize_colors(svg),
            r##"<rect fill="#000000#000000"/>"##
        );
    }

    #[test]
    fn nested_calls_are_consumed() {
        let svg = r#"<stop stop-color="color(display-p3 calc(1) 0 0)"/>"#;
        assert_eq!(sanitize_colors(svg), r##"<stop stop-color="#000000"/>"##);
    }

    #[test]
    fn text_content_is_preserved() {
        let svg = r#"<text fill="lab(50 40 59)">Warna lab(50 40 59) dipakai</text>"#;
        assert_eq!(
            sanitize_colors(svg),
            r##"<text fill="#000000">Warna lab(50 40 59) dipakai</text>"##
        );
    }

    #[test]
    fn lch_inside_oklch_is_not_double_counted() {
        assert_eq!(
            sanitize_colors(r#"<g fill="OKLCH(1 0 0)"/>"#),
            r##"<g fill="#000000"/>"##
        );
    }
}
