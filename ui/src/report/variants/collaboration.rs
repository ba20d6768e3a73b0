use time::Date;

use crate::{
    api::{ExplorationResult, ExplorationSide, AI_ANALYSIS_DISCLAIMER},
    core::format::format_long_date,
    report::{
        compose::{palette, Anchor, SvgPage, TextStyle},
        layout::{PageFragment, FRAGMENT_HEIGHT_PX, FRAGMENT_WIDTH_PX},
        text::{self, FontWeight},
    },
};

pub(super) const PAGE_IDS: [&str; 2] = ["report-page-1", "report-page-2"];

const PADDING: f64 = 40.0;

pub(super) fn compose(result: &ExplorationResult, today: Date) -> Vec<PageFragment> {
    vec![first_page(result, today), second_page(result)]
}

fn first_page(result: &ExplorationResult, today: Date) -> PageFragment {
    let mut page = SvgPage::new(FRAGMENT_WIDTH_PX, PADDING);
    page.header(
        "Laporan Analisis Potensi Kolaborasi Inovasi",
        &result.title,
        &[format!("Tanggal Cetak: {}", format_long_date(today))],
    );

    page.section_title("Inovasi yang Dianalisis");
    innovation_cards(&mut page, &result.side_a, &result.side_b);

    score_panel(&mut page, result);

    page.marker_list(
        "Manfaat Kolaborasi",
        &result.benefits,
        "#",
        palette::GREEN,
        palette::GREEN_SOFT,
    );
    page.finish_fixed(PAGE_IDS[0], FRAGMENT_HEIGHT_PX)
}

fn second_page(result: &ExplorationResult) -> PageFragment {
    let mut page = SvgPage::new(FRAGMENT_WIDTH_PX, PADDING);
    page.marker_list(
        "Alasan Kecocokan",
        std::slice::from_ref(&result.rationale),
        "•",
        palette::PURPLE,
        palette::PURPLE_SOFT,
    );
    page.marker_list(
        "Dampak Potensial",
        &result.impacts,
        "#",
        palette::ORANGE,
        palette::ORANGE_SOFT,
    );
    page.paragraph(
        AI_ANALYSIS_DISCLAIMER,
        TextStyle::new(12.0, FontWeight::Regular, palette::SUBTLE).line_height(1.6),
        Anchor::Start,
    );
    page.footer();
    page.finish_fixed(PAGE_IDS[1], FRAGMENT_HEIGHT_PX)
}

fn innovation_cards(page: &mut SvgPage, first: &ExplorationSide, second: &ExplorationSide) {
    const GAP: f64 = 16.0;
    const PAD: f64 = 16.0;
    let title_style = TextStyle::new(16.0, FontWeight::Bold, palette::INK).line_height(1.35);
    let unit_style = TextStyle::new(13.0, FontWeight::Regular, palette::MUTED).line_height(1.4);
    let (x, top) = (page.left(), page.cursor());
    let col_w = (page.content_width() - GAP) / 2.0;
    let inner_w = col_w - PAD * 2.0;

    let height_of = |side: &ExplorationSide| {
        let lines = |s: &str, style: TextStyle<'_>| {
            text::wrap(s, inner_w, style.weight, style.size).len().max(1) as f64
                * text::metrics(style.size, style.line_height).line_h
        };
        PAD * 2.0 + 20.0 + lines(&side.title, title_style) + 6.0 + lines(&side.owning_unit, unit_style)
    };
    let card_h = height_of(first).max(height_of(second));

    for (idx, side) in [first, second].into_iter().enumerate() {
        let cx = x + idx as f64 * (col_w + GAP);
        page.rect(cx, top, col_w, card_h, palette::BLUE_SOFT, 8.0);
        page.text(
            cx + PAD,
            top + PAD + 12.0,
            &format!("Inovasi {}", idx + 1),
            TextStyle::new(12.0, FontWeight::SemiBold, palette::BLUE),
            Anchor::Start,
        );
        let mut y = top + PAD + 20.0;
        y += page.text_block(cx + PAD, y, inner_w, &side.title, title_style, Anchor::Start) + 6.0;
        page.text_block(cx + PAD, y, inner_w, &side.owning_unit, unit_style, Anchor::Start);
    }
    page.advance(card_h + 24.0);
}

fn score_panel(page: &mut SvgPage, result: &ExplorationResult) {
    const PANEL_H: f64 = 112.0;
    let tier = result.tier();
    let (x, top, w) = (page.left(), page.cursor(), page.content_width());
    page.rect(x, top, w, PANEL_H, palette::PANEL, 8.0);
    page.rect(x, top, 4.0, PANEL_H, tier.report_color(), 0.0);
    page.text(
        x + 24.0,
        top + 32.0,
        "Skor Kecocokan",
        TextStyle::new(14.0, FontWeight::SemiBold, palette::MUTED),
        Anchor::Start,
    );
    page.text(
        x + 24.0,
        top + 80.0,
        &format!("{}%", result.score_percent),
        TextStyle::new(40.0, FontWeight::Bold, tier.report_color()),
        Anchor::Start,
    );
    page.badge(x + 160.0, top + 56.0, tier.label(), tier.report_color(), palette::WHITE);

    let level_x = x + w / 2.0 + 16.0;
    page.text(
        level_x,
        top + 32.0,
        "Tingkat Kolaborasi",
        TextStyle::new(14.0, FontWeight::SemiBold, palette::MUTED),
        Anchor::Start,
    );
    page.text_block(
        level_x,
        top + 44.0,
        w / 2.0 - 40.0,
        &result.collaboration_level,
        TextStyle::new(18.0, FontWeight::Bold, palette::INK).line_height(1.3),
        Anchor::Start,
    );
    page.advance(PANEL_H + 28.0);
}
