//! Cursor-based SVG page composer.
//!
//! Pages are built top to bottom: every block draws at the current cursor and
//! advances it. Fluid pages take their height from the final cursor, fixed
//! pages clip to their declared size.

use std::fmt::Write as _;

use super::{
    layout::PageFragment,
    text::{self, FontWeight},
};

pub const FONT_FAMILY: &str = "Inter, 'Segoe UI', Roboto, Arial, sans-serif";

pub mod palette {
    pub const WHITE: &str = "#ffffff";
    pub const INK: &str = "#1f2937";
    pub const BODY: &str = "#374151";
    pub const MUTED: &str = "#4b5563";
    pub const SUBTLE: &str = "#6b7280";
    pub const BORDER: &str = "#D1D5DB";
    pub const GRID: &str = "#e5e7eb";
    pub const PANEL: &str = "#f9fafb";
    pub const BLUE: &str = "#2563EB";
    pub const BLUE_SOFT: &str = "#EFF6FF";
    pub const GREEN: &str = "#16A34A";
    pub const GREEN_SOFT: &str = "#F0FDF4";
    pub const PURPLE: &str = "#9333EA";
    pub const PURPLE_SOFT: &str = "#FAF5FF";
    pub const ORANGE: &str = "#F97316";
    pub const ORANGE_SOFT: &str = "#FFF7ED";
    pub const EMERALD: &str = "#10b981";
    pub const AMBER: &str = "#f59e0b";
}

pub const FOOTER_AGENCY: &str = "BADAN RISET DAN INOVASI DAERAH PROVINSI JAWA TIMUR";
pub const FOOTER_ADDRESS: &str = "Jl. Gayung Kebonsari No.56, Gayungan, Kec. Gayungan Surabaya, Jawa Timur 60235 | Email: balitbangjatim@gmail.com | Website: brida.jatimprov.go.id";

pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() && c != '\n' && c != '\t' => {}
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle<'a> {
    pub size: f64,
    pub weight: FontWeight,
    pub fill: &'a str,
    pub line_height: f64,
}

impl<'a> TextStyle<'a> {
    pub const fn new(size: f64, weight: FontWeight, fill: &'a str) -> Self {
        Self {
            size,
            weight,
            fill,
            line_height: 1.5,
        }
    }

    pub const fn line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }
}

/// A headline number on a tinted card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub background: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

pub struct SvgPage {
    width: f64,
    padding: f64,
    cursor: f64,
    body: String,
}

impl SvgPage {
    pub fn new(width_px: u32, padding: f64) -> Self {
        Self {
            width: f64::from(width_px),
            padding,
            cursor: padding,
            body: String::new(),
        }
    }

    pub fn content_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    pub fn left(&self) -> f64 {
        self.padding
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn advance(&mut self, dy: f64) {
        self.cursor += dy;
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str, radius: f64) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{:.1}" rx="{radius:.1}" fill="{fill}"/>"#,
            w.max(0.0),
            h.max(0.0)
        );
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        let _ = write!(
            self.body,
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="{width:.1}"/>"#
        );
    }

    pub fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        let _ = write!(
            self.body,
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{stroke}" stroke-width="1" stroke-dasharray="3 3"/>"#
        );
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        let _ = write!(
            self.body,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}"/>"#
        );
    }

    /// Single line of text with its baseline at `baseline`.
    pub fn text(&mut self, x: f64, baseline: f64, content: &str, style: TextStyle<'_>, anchor: Anchor) {
        let _ = write!(
            self.body,
            r#"<text x="{x:.1}" y="{baseline:.1}" font-size="{:.1}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            style.size,
            style.weight.svg_value(),
            style.fill,
            anchor.as_str(),
            escape_xml(content)
        );
    }

    /// Wrapped text block at `(x, top)`. Returns the block height.
    pub fn text_block(
        &mut self,
        x: f64,
        top: f64,
        width: f64,
        content: &str,
        style: TextStyle<'_>,
        anchor: Anchor,
    ) -> f64 {
        let lines = text::wrap(content, width, style.weight, style.size);
        let m = text::metrics(style.size, style.line_height);
        let anchor_x = match anchor {
            Anchor::Start => x,
            Anchor::Middle => x + width / 2.0,
            Anchor::End => x + width,
        };
        for (idx, line) in lines.iter().enumerate() {
            let baseline = top + m.asc + m.line_h * idx as f64;
            self.text(anchor_x, baseline, line, style, anchor);
        }
        m.line_h * lines.len() as f64
    }

    /// Wrapped paragraph across the content width at the cursor.
    pub fn paragraph(&mut self, content: &str, style: TextStyle<'_>, anchor: Anchor) {
        let (x, top, width) = (self.left(), self.cursor, self.content_width());
        let height = self.text_block(x, top, width, content, style, anchor);
        self.advance(height);
    }

    /// Centered report header closed by a blue rule.
    pub fn header(&mut self, title: &str, subtitle: &str, meta: &[String]) {
        self.paragraph(
            "BRIDA JATIM",
            TextStyle::new(14.0, FontWeight::Bold, palette::BLUE),
            Anchor::Middle,
        );
        self.advance(10.0);
        self.paragraph(
            title,
            TextStyle::new(30.0, FontWeight::Bold, palette::INK).line_height(1.25),
            Anchor::Middle,
        );
        self.advance(8.0);
        self.paragraph(
            subtitle,
            TextStyle::new(20.0, FontWeight::Regular, palette::MUTED).line_height(1.3),
            Anchor::Middle,
        );
        self.advance(8.0);
        for line in meta {
            self.paragraph(
                line,
                TextStyle::new(14.0, FontWeight::Regular, palette::SUBTLE),
                Anchor::Middle,
            );
        }
        self.advance(20.0);
        let (x, w, y) = (self.left(), self.content_width(), self.cursor);
        self.rect(x, y, w, 4.0, palette::BLUE, 0.0);
        self.advance(32.0);
    }

    /// Section heading with a blue bar on its left edge.
    pub fn section_title(&mut self, title: &str) {
        let (x, y) = (self.left(), self.cursor);
        let style = TextStyle::new(22.0, FontWeight::Bold, palette::INK).line_height(1.3);
        let height = self.text_block(x + 16.0, y, self.content_width() - 16.0, title, style, Anchor::Start);
        self.rect(x, y, 4.0, height, palette::BLUE, 0.0);
        self.advance(height + 18.0);
    }

    /// Two-column grid of stat cards.
    pub fn stat_grid(&mut self, cards: &[StatCard]) {
        const GAP: f64 = 20.0;
        const CARD_H: f64 = 104.0;
        let col_w = (self.content_width() - GAP) / 2.0;
        for (row, chunk) in cards.chunks(2).enumerate() {
            let y = self.cursor + row as f64 * (CARD_H + GAP);
            for (col, card) in chunk.iter().enumerate() {
                let x = self.left() + col as f64 * (col_w + GAP);
                self.rect(x, y, col_w, CARD_H, card.background, 8.0);
                self.rect(x, y, 4.0, CARD_H, card.accent, 0.0);
                self.text(
                    x + 20.0,
                    y + 34.0,
                    &card.label,
                    TextStyle::new(14.0, FontWeight::SemiBold, palette::MUTED),
                    Anchor::Start,
                );
                self.text(
                    x + 20.0,
                    y + 80.0,
                    &card.value,
                    TextStyle::new(34.0, FontWeight::Bold, palette::INK),
                    Anchor::Start,
                );
            }
        }
        let rows = cards.len().div_ceil(2) as f64;
        self.advance(rows * CARD_H + (rows - 1.0).max(0.0) * GAP + 32.0);
    }

    fn chart_frame(&mut self, height: f64) -> (f64, f64, f64, f64) {
        let (x, y, w) = (self.left(), self.cursor, self.content_width());
        self.rect(x, y, w, height, palette::PANEL, 8.0);
        // plot area: left axis gutter, bottom label gutter
        (x + 56.0, y + 20.0, w - 80.0, height - 76.0)
    }

    fn value_axis(&mut self, px: f64, py: f64, pw: f64, ph: f64, max: f64) {
        const TICKS: usize = 4;
        let label = TextStyle::new(12.0, FontWeight::Regular, palette::BODY);
        for tick in 0..=TICKS {
            let value = max * tick as f64 / TICKS as f64;
            let y = py + ph - ph * tick as f64 / TICKS as f64;
            self.dashed_line(px, y, px + pw, y, palette::GRID);
            self.text(px - 8.0, y + 4.0, &format_tick(value), label, Anchor::End);
        }
        self.line(px, py + ph, px + pw, py + ph, palette::SUBTLE, 1.0);
    }

    /// Vertical bar chart with value labels on top.
    pub fn bar_chart(&mut self, bars: &[(String, f64)], height: f64, color: &str) {
        let (px, py, pw, ph) = self.chart_frame(height);
        let max = nice_max(bars.iter().map(|(_, v)| *v).fold(0.0, f64::max));
        self.value_axis(px, py, pw, ph, max);
        if !bars.is_empty() {
            let slot = pw / bars.len() as f64;
            let bar_w = (slot * 0.6).min(80.0);
            for (idx, (label, value)) in bars.iter().enumerate() {
                let h = if max > 0.0 { ph * value / max } else { 0.0 };
                let cx = px + slot * (idx as f64 + 0.5);
                self.rect(cx - bar_w / 2.0, py + ph - h, bar_w, h, color, 4.0);
                self.text(
                    cx,
                    py + ph - h - 6.0,
                    &format_tick(*value),
                    TextStyle::new(13.0, FontWeight::Bold, palette::INK),
                    Anchor::Middle,
                );
                self.text_block(
                    cx - slot / 2.0 + 2.0,
                    py + ph + 8.0,
                    slot - 4.0,
                    label,
                    TextStyle::new(11.0, FontWeight::Regular, palette::BODY).line_height(1.2),
                    Anchor::Middle,
                );
            }
        }
        self.advance(height + 24.0);
    }

    /// Multi-series line chart with a legend row beneath the plot.
    pub fn line_chart(&mut self, labels: &[String], series: &[Series], height: f64) {
        let (px, py, pw, ph) = self.chart_frame(height);
        let peak = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max);
        let max = nice_max(peak);
        self.value_axis(px, py, pw, ph, max);
        let step = if labels.len() > 1 {
            pw / (labels.len() - 1) as f64
        } else {
            0.0
        };
        let x_at = |idx: usize| {
            if labels.len() > 1 {
                px + step * idx as f64
            } else {
                px + pw / 2.0
            }
        };
        let axis_label = TextStyle::new(12.0, FontWeight::Regular, palette::BODY);
        for (idx, label) in labels.iter().enumerate() {
            self.text(x_at(idx), py + ph + 18.0, label, axis_label, Anchor::Middle);
        }
        for s in series {
            let y_at = |v: f64| {
                if max > 0.0 {
                    py + ph - ph * v / max
                } else {
                    py + ph
                }
            };
            let points: Vec<String> = s
                .values
                .iter()
                .enumerate()
                .take(labels.len())
                .map(|(idx, v)| format!("{:.1},{:.1}", x_at(idx), y_at(*v)))
                .collect();
            if points.len() > 1 {
                let _ = write!(
                    self.body,
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="3" stroke-linejoin="round"/>"#,
                    points.join(" "),
                    s.color
                );
            }
            for (idx, v) in s.values.iter().enumerate().take(labels.len()) {
                self.circle(x_at(idx), y_at(*v), 4.0, s.color);
            }
        }
        // legend
        let legend_y = py + ph + 44.0;
        let legend_style = TextStyle::new(13.0, FontWeight::SemiBold, palette::BODY);
        let mut lx = px;
        for s in series {
            self.rect(lx, legend_y - 9.0, 14.0, 4.0, s.color, 1.0);
            self.text(lx + 20.0, legend_y - 3.0, &s.name, legend_style, Anchor::Start);
            lx += 36.0 + text::advance_width(&s.name, FontWeight::SemiBold, 13.0);
        }
        self.advance(height + 24.0);
    }

    /// Horizontal bars, one row per ranked entry. Suits long unit names.
    pub fn ranked_bars(&mut self, rows: &[(String, f64)], color: &str) {
        const ROW_H: f64 = 34.0;
        let (x, w) = (self.left(), self.content_width());
        let label_w = w * 0.42;
        let bar_x = x + label_w + 12.0;
        let bar_w = w - label_w - 72.0;
        let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let label = TextStyle::new(13.0, FontWeight::Regular, palette::BODY);
        for (idx, (name, value)) in rows.iter().enumerate() {
            let y = self.cursor + idx as f64 * ROW_H;
            let shown = truncate_to_width(name, label_w, label);
            self.text(x, y + 20.0, &shown, label, Anchor::Start);
            self.rect(bar_x, y + 8.0, bar_w, 16.0, palette::PANEL, 4.0);
            let filled = if max > 0.0 { bar_w * value / max } else { 0.0 };
            self.rect(bar_x, y + 8.0, filled, 16.0, color, 4.0);
            self.text(
                x + w,
                y + 21.0,
                &format_tick(*value),
                TextStyle::new(13.0, FontWeight::Bold, palette::INK),
                Anchor::End,
            );
        }
        self.advance(rows.len() as f64 * ROW_H + 24.0);
    }

    /// Tinted panel holding a titled list with a marker glyph per item.
    pub fn marker_list(
        &mut self,
        title: &str,
        items: &[String],
        marker: &str,
        accent: &'static str,
        background: &'static str,
    ) {
        const PAD: f64 = 24.0;
        let item_style = TextStyle::new(15.0, FontWeight::Regular, palette::BODY).line_height(1.6);
        let (x, w, top) = (self.left(), self.content_width(), self.cursor);
        let text_w = w - PAD * 2.0 - 28.0;

        // Measure first so the panel can be drawn beneath the text.
        let title_h = text::metrics(22.0, 1.3).line_h;
        let item_heights: Vec<f64> = items
            .iter()
            .map(|item| {
                let lines = text::wrap(item, text_w, item_style.weight, item_style.size).len().max(1);
                lines as f64 * text::metrics(item_style.size, item_style.line_height).line_h
            })
            .collect();
        let body_h: f64 = item_heights.iter().sum::<f64>() + 12.0 * items.len().saturating_sub(1) as f64;
        let panel_h = PAD * 2.0 + title_h + 16.0 + body_h;
        self.rect(x, top, w, panel_h, background, 8.0);
        self.rect(x, top, 4.0, panel_h, accent, 0.0);

        self.text_block(
            x + PAD,
            top + PAD,
            w - PAD * 2.0,
            title,
            TextStyle::new(22.0, FontWeight::Bold, palette::INK).line_height(1.3),
            Anchor::Start,
        );
        let mut y = top + PAD + title_h + 16.0;
        for (idx, item) in items.iter().enumerate() {
            let glyph = if marker == "#" {
                format!("{}.", idx + 1)
            } else {
                marker.to_string()
            };
            self.text(
                x + PAD,
                y + 17.0,
                &glyph,
                TextStyle::new(16.0, FontWeight::Bold, accent),
                Anchor::Start,
            );
            self.text_block(x + PAD + 28.0, y, text_w, item, item_style, Anchor::Start);
            y += item_heights[idx] + 12.0;
        }
        self.advance(panel_h + 32.0);
    }

    /// Rounded pill, e.g. a score badge. Returns its width.
    pub fn badge(&mut self, x: f64, y: f64, label: &str, fill: &str, text_fill: &str) -> f64 {
        let style = TextStyle::new(14.0, FontWeight::Bold, text_fill);
        let w = text::advance_width(label, style.weight, style.size) + 24.0;
        self.rect(x, y, w, 28.0, fill, 14.0);
        self.text(x + w / 2.0, y + 19.0, label, style, Anchor::Middle);
        w
    }

    pub fn footer(&mut self) {
        self.advance(28.0);
        let (x, w, y) = (self.left(), self.content_width(), self.cursor);
        self.line(x, y, x + w, y, palette::BORDER, 2.0);
        self.advance(24.0);
        self.paragraph(
            FOOTER_AGENCY,
            TextStyle::new(14.0, FontWeight::Bold, palette::INK),
            Anchor::Middle,
        );
        self.advance(6.0);
        self.paragraph(
            FOOTER_ADDRESS,
            TextStyle::new(12.0, FontWeight::Regular, palette::SUBTLE).line_height(1.6),
            Anchor::Middle,
        );
    }

    fn document(&self, height: f64) -> String {
        let w = self.width;
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{height:.0}" viewBox="0 0 {w:.0} {height:.0}" font-family="{FONT_FAMILY}"><rect width="{w:.0}" height="{height:.0}" fill="{}"/>{}</svg>"#,
            palette::WHITE,
            self.body
        )
    }

    /// Height follows the content.
    pub fn finish_fluid(self, id: &str) -> PageFragment {
        let height = (self.cursor + self.padding).ceil();
        PageFragment {
            id: id.to_string(),
            width_px: self.width as u32,
            height_px: height as u32,
            svg: self.document(height),
        }
    }

    /// Fixed page size; overflowing content is clipped.
    pub fn finish_fixed(self, id: &str, height_px: u32) -> PageFragment {
        PageFragment {
            id: id.to_string(),
            width_px: self.width as u32,
            height_px,
            svg: self.document(f64::from(height_px)),
        }
    }
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Round an axis maximum up to 1, 2, 2.5 or 5 times a power of ten.
pub fn nice_max(peak: f64) -> f64 {
    if !peak.is_finite() || peak <= 0.0 {
        return 4.0;
    }
    let magnitude = 10f64.powf(peak.log10().floor());
    let normalized = peak / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|s| normalized <= *s)
        .unwrap_or(10.0);
    step * magnitude
}

fn truncate_to_width(raw: &str, max_width: f64, style: TextStyle<'_>) -> String {
    if text::advance_width(raw, style.weight, style.size) <= max_width {
        return raw.to_string();
    }
    let mut out = String::new();
    for ch in raw.chars() {
        out.push(ch);
        if text::advance_width(&format!("{out}…"), style.weight, style.size) > max_width {
            out.pop();
            break;
        }
    }
    format!("{}…", out.trim_end())
}
