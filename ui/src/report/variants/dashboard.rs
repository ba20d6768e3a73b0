use time::Date;

use crate::{
    api::{AiInsight, ApiClient, DashboardCore, HttpGet, TrendPoint},
    core::format::{format_count, format_long_date, format_number},
    report::{
        compose::{palette, Anchor, Series, StatCard, SvgPage, TextStyle},
        error::ReportError,
        layout::{PageFragment, CANVAS_WIDTH_PX},
        text::FontWeight,
    },
};

pub(super) const PAGE_ID: &str = "report-dashboard";

const TOP_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardReport {
    pub year: Option<i32>,
    pub core: DashboardCore,
    pub trend: Vec<TrendPoint>,
    pub insights: Vec<AiInsight>,
}

/// The four core aggregates must all arrive; trend and insights degrade.
pub(super) async fn load<T: HttpGet>(
    api: &ApiClient<T>,
    year: Option<i32>,
) -> Result<DashboardReport, ReportError> {
    let (core, trend, insights) = futures::join!(
        api.dashboard_core(),
        api.trend_or_empty(year),
        api.ai_insight_or_fallback()
    );
    Ok(DashboardReport {
        year,
        core: core?,
        trend,
        insights,
    })
}

pub(super) fn trend_title(year: Option<i32>) -> String {
    match year {
        Some(year) => format!("Tren Inovasi Per Bulan ({year})"),
        None => "Tren Inovasi Per Tahun".to_string(),
    }
}

pub(super) fn trend_series(trend: &[TrendPoint]) -> (Vec<String>, Vec<Series>) {
    let labels = trend.iter().map(|p| p.label.clone()).collect();
    let series = vec![
        Series {
            name: "Digital".into(),
            color: palette::BLUE,
            values: trend.iter().map(|p| p.digital as f64).collect(),
        },
        Series {
            name: "Non-Digital".into(),
            color: palette::EMERALD,
            values: trend.iter().map(|p| p.non_digital as f64).collect(),
        },
        Series {
            name: "Teknologi".into(),
            color: palette::AMBER,
            values: trend.iter().map(|p| p.technology as f64).collect(),
        },
    ];
    (labels, series)
}

pub(super) fn ranked_rows(rows: &[crate::api::RankedCount], limit: usize) -> Vec<(String, f64)> {
    rows.iter()
        .take(limit)
        .map(|row| (row.name.clone(), row.count as f64))
        .collect()
}

pub(super) fn compose(report: &DashboardReport, today: Date) -> PageFragment {
    let mut page = SvgPage::new(CANVAS_WIDTH_PX, 48.0);
    let period = report
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "Semua Tahun".into());
    page.header(
        "Executive Summary Report",
        "Dashboard Inovasi Daerah BRIDA Jawa Timur",
        &[
            format!("Periode: {period}"),
            format!("Tanggal Cetak: {}", format_long_date(today)),
        ],
    );

    let stats = &report.core.stats;
    let new_label = format!(
        "Inovasi Baru {}",
        report.year.unwrap_or_else(|| today.year())
    );
    page.section_title("Ringkasan Statistik");
    page.stat_grid(&[
        StatCard {
            label: "Total Inovasi".into(),
            value: format_count(stats.total),
            background: palette::BLUE_SOFT,
            accent: palette::BLUE,
        },
        StatCard {
            label: "Rata-rata Kematangan".into(),
            value: format_number(stats.average_maturity, 1),
            background: palette::GREEN_SOFT,
            accent: palette::GREEN,
        },
        StatCard {
            label: "Inovasi Digital".into(),
            value: format_count(stats.digital),
            background: palette::PURPLE_SOFT,
            accent: palette::PURPLE,
        },
        StatCard {
            label: new_label,
            value: format_count(stats.new_this_year),
            background: palette::ORANGE_SOFT,
            accent: palette::ORANGE,
        },
    ]);

    page.section_title(&trend_title(report.year));
    if report.trend.is_empty() {
        page.paragraph(
            "Data tren belum tersedia.",
            TextStyle::new(15.0, FontWeight::Regular, palette::SUBTLE),
            Anchor::Start,
        );
        page.advance(24.0);
    } else {
        let (labels, series) = trend_series(&report.trend);
        page.line_chart(&labels, &series, 300.0);
    }

    page.section_title("Distribusi Tingkat Kematangan");
    let buckets: Vec<(String, f64)> = report
        .core
        .maturity
        .iter()
        .map(|b| (b.level.clone(), b.count as f64))
        .collect();
    page.bar_chart(&buckets, 280.0, palette::BLUE);

    page.section_title("OPD dengan Inovasi Terbanyak");
    page.ranked_bars(&ranked_rows(&report.core.top_units, TOP_ROWS), palette::PURPLE);

    page.section_title("Urusan Pemerintahan Teratas");
    page.ranked_bars(&ranked_rows(&report.core.top_domains, TOP_ROWS), palette::EMERALD);

    let insights: Vec<String> = report.insights.iter().map(|i| i.text.clone()).collect();
    if !insights.is_empty() {
        page.marker_list(
            "Temuan Utama (AI Insight)",
            &insights,
            "•",
            palette::BLUE,
            palette::BLUE_SOFT,
        );
    }

    page.footer();
    page.finish_fluid(PAGE_ID)
}
