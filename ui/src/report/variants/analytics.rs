use time::Date;

use crate::{
    api::{AnalyticsFilters, ApiClient, HttpGet, MaturityBucket, RankedCount, TrendPoint},
    core::format::format_long_date,
    report::{
        compose::{palette, Anchor, SvgPage, TextStyle},
        error::ReportError,
        layout::{PageFragment, FRAGMENT_HEIGHT_PX, FRAGMENT_WIDTH_PX},
        text::FontWeight,
    },
};

use super::dashboard::{ranked_rows, trend_series, trend_title};

pub(super) const PAGE_IDS: [&str; 2] = ["report-page-1", "report-page-2"];

const PADDING: f64 = 40.0;
const TOP_ROWS: usize = 8;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsReport {
    pub filters: AnalyticsFilters,
    pub maturity: Vec<MaturityBucket>,
    pub top_units: Vec<RankedCount>,
    pub top_domains: Vec<RankedCount>,
    pub trend: Vec<TrendPoint>,
}

pub(super) async fn load<T: HttpGet>(
    api: &ApiClient<T>,
    filters: AnalyticsFilters,
) -> Result<AnalyticsReport, ReportError> {
    let (aggregates, trend) = futures::join!(
        async { futures::try_join!(api.maturity(), api.top_units(), api.top_domains()) },
        api.trend_or_empty(filters.year)
    );
    let (maturity, top_units, top_domains) = aggregates?;
    Ok(AnalyticsReport {
        filters,
        maturity,
        top_units,
        top_domains,
        trend,
    })
}

pub(super) fn compose(report: &AnalyticsReport, today: Date) -> Vec<PageFragment> {
    let mut first = SvgPage::new(FRAGMENT_WIDTH_PX, PADDING);
    first.header(
        "Laporan Analitik Inovasi Daerah",
        "BRIDA Jawa Timur",
        &[format!("Tanggal Cetak: {}", format_long_date(today))],
    );
    let summary = report
        .filters
        .summary()
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("  ·  ");
    first.paragraph(
        &summary,
        TextStyle::new(13.0, FontWeight::SemiBold, palette::MUTED).line_height(1.5),
        Anchor::Middle,
    );
    first.advance(24.0);

    first.section_title("Distribusi Tingkat Kematangan");
    let buckets: Vec<(String, f64)> = report
        .maturity
        .iter()
        .map(|b| (b.level.clone(), b.count as f64))
        .collect();
    first.bar_chart(&buckets, 240.0, palette::BLUE);

    first.section_title(&trend_title(report.filters.year));
    if report.trend.is_empty() {
        first.paragraph(
            "Data tren belum tersedia.",
            TextStyle::new(14.0, FontWeight::Regular, palette::SUBTLE),
            Anchor::Start,
        );
    } else {
        let (labels, series) = trend_series(&report.trend);
        first.line_chart(&labels, &series, 240.0);
    }

    let mut second = SvgPage::new(FRAGMENT_WIDTH_PX, PADDING);
    second.section_title("OPD dengan Inovasi Terbanyak");
    second.ranked_bars(&ranked_rows(&report.top_units, TOP_ROWS), palette::PURPLE);
    second.section_title("Urusan Pemerintahan Teratas");
    second.ranked_bars(&ranked_rows(&report.top_domains, TOP_ROWS), palette::EMERALD);
    second.footer();

    vec![
        first.finish_fixed(PAGE_IDS[0], FRAGMENT_HEIGHT_PX),
        second.finish_fixed(PAGE_IDS[1], FRAGMENT_HEIGHT_PX),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn filters_are_printed_on_the_first_page() {
        let report = AnalyticsReport {
            filters: AnalyticsFilters {
                year: Some(2024),
                unit: Some("Bappeda".into()),
                ..AnalyticsFilters::default()
            },
            top_units: vec![RankedCount {
                name: "Bappeda".into(),
                count: 9,
            }],
            ..AnalyticsReport::default()
        };
        let pages = compose(&report, date!(2026 - 10 - 17));
        assert!(pages[0].svg.contains("Tahun: 2024"));
        assert!(pages[0].svg.contains("OPD: Bappeda"));
        assert!(pages[0].svg.contains("Jenis Inovasi: Semua"));
        assert!(pages[1].svg.contains("OPD dengan Inovasi Terbanyak"));
    }
}
