use time::Date;

use crate::{
    api::{CollaborationRecommendation, RecommendationList},
    core::{
        format::{format_count, format_long_date, format_run_timestamp},
        score::ScoreTier,
    },
    report::{
        compose::{palette, Anchor, StatCard, SvgPage, TextStyle},
        layout::{PageFragment, CANVAS_WIDTH_PX},
        text::{self, FontWeight},
    },
};

pub(super) const PAGE_ID: &str = "report-ai-recommendation";

const CARD_PAD: f64 = 20.0;

pub(super) fn compose(list: &RecommendationList, today: Date) -> PageFragment {
    let mut page = SvgPage::new(CANVAS_WIDTH_PX, 48.0);
    let mut meta = vec![format!("Tanggal Cetak: {}", format_long_date(today))];
    if let Some(last_run) = &list.last_run {
        meta.push(format!("Clustering terakhir: {}", format_run_timestamp(last_run)));
    }
    page.header(
        "Laporan Rekomendasi Kolaborasi AI",
        "Rekomendasi Kolaborasi Inovasi Daerah",
        &meta,
    );

    let per_tier: Vec<(ScoreTier, usize)> = ScoreTier::ALL
        .iter()
        .map(|tier| {
            (
                *tier,
                list.items.iter().filter(|rec| rec.tier() == *tier).count(),
            )
        })
        .collect();

    page.section_title("Ringkasan");
    let mut cards = vec![StatCard {
        label: "Total Rekomendasi".into(),
        value: format_count(list.items.len() as u64),
        background: palette::BLUE_SOFT,
        accent: palette::BLUE,
    }];
    for (tier, count) in &per_tier {
        let (background, accent) = match tier {
            ScoreTier::Excellent => (palette::GREEN_SOFT, palette::GREEN),
            ScoreTier::Promising => (palette::PURPLE_SOFT, palette::PURPLE),
            ScoreTier::Fair => (palette::ORANGE_SOFT, palette::ORANGE),
        };
        cards.push(StatCard {
            label: tier.label().into(),
            value: format_count(*count as u64),
            background,
            accent,
        });
    }
    page.stat_grid(&cards);

    page.section_title("Distribusi Kategori Kecocokan");
    let bars: Vec<(String, f64)> = per_tier
        .iter()
        .map(|(tier, count)| (tier.label().to_string(), *count as f64))
        .collect();
    page.bar_chart(&bars, 240.0, palette::BLUE);

    page.section_title("Daftar Rekomendasi");
    if list.items.is_empty() {
        page.paragraph(
            "Belum ada rekomendasi kolaborasi.",
            TextStyle::new(15.0, FontWeight::Regular, palette::SUBTLE),
            Anchor::Start,
        );
    }
    for (rank, rec) in list.items.iter().enumerate() {
        recommendation_card(&mut page, rank + 1, rec);
    }

    page.footer();
    page.finish_fluid(PAGE_ID)
}

fn recommendation_card(page: &mut SvgPage, rank: usize, rec: &CollaborationRecommendation) {
    let (x, top, w) = (page.left(), page.cursor(), page.content_width());
    let title_style = TextStyle::new(17.0, FontWeight::Bold, palette::INK).line_height(1.35);
    let detail_style = TextStyle::new(13.0, FontWeight::Regular, palette::MUTED).line_height(1.5);
    let text_x = x + CARD_PAD + 48.0;
    let text_w = w - CARD_PAD * 2.0 - 48.0 - 150.0;

    let pair = format!("{} × {}", rec.innovation_a.title, rec.innovation_b.title);
    let details = [
        format!(
            "Urusan: {} / {}",
            rec.innovation_a.domain, rec.innovation_b.domain
        ),
        format!(
            "Tahap: {} / {}",
            rec.innovation_a.stage, rec.innovation_b.stage
        ),
        format!(
            "Kematangan: {} / {}",
            rec.innovation_a.maturity_label, rec.innovation_b.maturity_label
        ),
    ];

    let title_h = text::wrap(&pair, text_w, title_style.weight, title_style.size).len().max(1) as f64
        * text::metrics(title_style.size, title_style.line_height).line_h;
    let detail_h: f64 = details
        .iter()
        .map(|line| {
            text::wrap(line, text_w, detail_style.weight, detail_style.size).len().max(1) as f64
                * text::metrics(detail_style.size, detail_style.line_height).line_h
        })
        .sum();
    let card_h = (CARD_PAD * 2.0 + title_h + 8.0 + detail_h).max(96.0);

    page.rect(x, top, w, card_h, palette::PANEL, 8.0);
    page.rect(x, top, 4.0, card_h, rec.tier().report_color(), 0.0);
    page.circle(x + CARD_PAD + 18.0, top + CARD_PAD + 18.0, 18.0, palette::BLUE);
    page.text(
        x + CARD_PAD + 18.0,
        top + CARD_PAD + 23.0,
        &rank.to_string(),
        TextStyle::new(15.0, FontWeight::Bold, palette::WHITE),
        Anchor::Middle,
    );

    let mut y = top + CARD_PAD;
    y += page.text_block(text_x, y, text_w, &pair, title_style, Anchor::Start) + 8.0;
    for line in &details {
        y += page.text_block(text_x, y, text_w, line, detail_style, Anchor::Start);
    }

    let badge_x = x + w - CARD_PAD - 130.0;
    page.text(
        badge_x + 65.0,
        top + CARD_PAD + 26.0,
        &format!("{}%", rec.percentage()),
        TextStyle::new(26.0, FontWeight::Bold, rec.tier().report_color()),
        Anchor::Middle,
    );
    let label_w = text::advance_width(rec.label(), FontWeight::Bold, 14.0) + 24.0;
    page.badge(
        badge_x + 65.0 - label_w / 2.0,
        top + CARD_PAD + 40.0,
        rec.label(),
        rec.tier().report_color(),
        palette::WHITE,
    );

    page.advance(card_h + 16.0);
}
