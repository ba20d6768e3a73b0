//! The four report variants: what each one loads, how its pages are
//! composed, and how they land on paper.

mod analytics;
mod collaboration;
mod dashboard;
mod recommendation;

use time::Date;
use tracing::info;

use super::{
    download::report_filename,
    error::ReportError,
    layout::{PageLayout, PageSize, ScratchRegion, FRAGMENT_MARGIN_MM},
};
use crate::api::{
    AnalyticsFilters, ApiClient, ExplorationResult, FetchError, HttpGet, RecommendationList,
};

pub use analytics::AnalyticsReport;
pub use dashboard::DashboardReport;

/// Recommendations fetched when the AI report is opened without a list.
pub const AI_REPORT_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum ReportRequest {
    /// Executive summary of the dashboard; `year` narrows the trend chart.
    Dashboard { year: Option<i32> },
    /// Ranked recommendations, either the list already on screen or a fresh fetch.
    AiRecommendation { preloaded: Option<RecommendationList> },
    /// Exploration result for one pair.
    Collaboration(Box<ExplorationResult>),
    Analytics { filters: AnalyticsFilters },
}

/// Static facts about a variant's output.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPlan {
    pub tag: &'static str,
    pub title: &'static str,
    pub page_size: PageSize,
    pub layout: PageLayout,
    pub expected_pages: Vec<String>,
}

impl ReportPlan {
    pub fn is_single_canvas(&self) -> bool {
        self.layout == PageLayout::SingleCanvas
    }
}

impl ReportRequest {
    pub fn plan(&self) -> ReportPlan {
        match self {
            ReportRequest::Dashboard { .. } => ReportPlan {
                tag: "Report",
                title: "Executive Summary Report",
                page_size: PageSize::A4_LANDSCAPE,
                layout: PageLayout::SingleCanvas,
                expected_pages: vec![dashboard::PAGE_ID.to_string()],
            },
            ReportRequest::AiRecommendation { .. } => ReportPlan {
                tag: "Rekomendasi",
                title: "Laporan Rekomendasi Kolaborasi AI",
                page_size: PageSize::A4_PORTRAIT,
                layout: PageLayout::SingleCanvas,
                expected_pages: vec![recommendation::PAGE_ID.to_string()],
            },
            ReportRequest::Collaboration(_) => ReportPlan {
                tag: "Kolaborasi",
                title: "Laporan Analisis Potensi Kolaborasi Inovasi",
                page_size: PageSize::A4_PORTRAIT,
                layout: PageLayout::Fragments {
                    margin_mm: FRAGMENT_MARGIN_MM,
                },
                expected_pages: collaboration::PAGE_IDS.iter().map(|id| id.to_string()).collect(),
            },
            ReportRequest::Analytics { .. } => ReportPlan {
                tag: "Analitik",
                title: "Laporan Analitik Inovasi Daerah",
                page_size: PageSize::A4_PORTRAIT,
                layout: PageLayout::Fragments {
                    margin_mm: FRAGMENT_MARGIN_MM,
                },
                expected_pages: analytics::PAGE_IDS.iter().map(|id| id.to_string()).collect(),
            },
        }
    }

    /// Fetch whatever the variant needs. Collaboration data is already in hand.
    pub async fn load<T: HttpGet>(&self, api: &ApiClient<T>) -> Result<ReportContent, ReportError> {
        info!(tag = self.plan().tag, "loading report data");
        match self {
            ReportRequest::Dashboard { year } => {
                dashboard::load(api, *year).await.map(ReportContent::Dashboard)
            }
            ReportRequest::AiRecommendation { preloaded } => {
                let list = match preloaded {
                    Some(list) if !list.items.is_empty() => list.clone(),
                    _ => api
                        .top_recommendations(AI_REPORT_LIMIT)
                        .await
                        .map_err(|err| match err {
                            FetchError::Empty(message) => ReportError::NoData(message),
                            other => ReportError::Fetch(other),
                        })?,
                };
                Ok(ReportContent::AiRecommendation(list))
            }
            ReportRequest::Collaboration(result) => {
                Ok(ReportContent::Collaboration(result.as_ref().clone()))
            }
            ReportRequest::Analytics { filters } => analytics::load(api, filters.clone())
                .await
                .map(ReportContent::Analytics),
        }
    }
}

/// Data a variant has gathered, ready for composition.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportContent {
    Dashboard(DashboardReport),
    AiRecommendation(RecommendationList),
    Collaboration(ExplorationResult),
    Analytics(AnalyticsReport),
}

impl ReportContent {
    /// Build the scratch region of page fragments for this content.
    pub fn compose(&self, today: Date) -> ScratchRegion {
        let mut scratch = ScratchRegion::new();
        match self {
            ReportContent::Dashboard(report) => scratch.push(dashboard::compose(report, today)),
            ReportContent::AiRecommendation(list) => {
                scratch.push(recommendation::compose(list, today))
            }
            ReportContent::Collaboration(result) => {
                for page in collaboration::compose(result, today) {
                    scratch.push(page);
                }
            }
            ReportContent::Analytics(report) => {
                for page in analytics::compose(report, today) {
                    scratch.push(page);
                }
            }
        }
        scratch
    }

    pub fn filename(&self, tag: &str, today: Date) -> String {
        match self {
            ReportContent::Collaboration(result) => report_filename(
                tag,
                &[result.side_a.title.as_str(), result.side_b.title.as_str()],
                today,
            ),
            ReportContent::Analytics(report) => {
                let year = report.filters.year.map(|y| y.to_string()).unwrap_or_default();
                report_filename(tag, &[year.as_str()], today)
            }
            ReportContent::AiRecommendation(list) if list.items.len() == 1 => {
                let only = &list.items[0];
                report_filename(
                    tag,
                    &[only.innovation_a.title.as_str(), only.innovation_b.title.as_str()],
                    today,
                )
            }
            _ => report_filename(tag, &[], today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ExplorationSide;
    use time::macros::date;

    fn exploration() -> ExplorationResult {
        ExplorationResult {
            title: "Satu Data Kesehatan".into(),
            score_percent: 91,
            benefits: vec!["Efisiensi".into(), "Akurasi".into()],
            impacts: vec!["Pelayanan lebih cepat".into()],
            rationale: "Data saling melengkapi".into(),
            collaboration_level: "Replikasi Penuh".into(),
            side_a: ExplorationSide {
                id: 1,
                title: "E-Health Surabaya".into(),
                owning_unit: "Dinas Kesehatan".into(),
            },
            side_b: ExplorationSide {
                id: 2,
                title: "SIAK Terpadu".into(),
                owning_unit: "Dispendukcapil".into(),
            },
        }
    }

    #[test]
    fn plans_match_the_paper_layouts() {
        let dashboard = ReportRequest::Dashboard { year: None }.plan();
        assert_eq!(dashboard.page_size, PageSize::A4_LANDSCAPE);
        assert!(dashboard.is_single_canvas());

        let collab = ReportRequest::Collaboration(Box::new(exploration())).plan();
        assert_eq!(collab.page_size, PageSize::A4_PORTRAIT);
        assert_eq!(collab.layout, PageLayout::Fragments { margin_mm: 15.0 });
        assert_eq!(collab.expected_pages, vec!["report-page-1", "report-page-2"]);
    }

    #[test]
    fn composed_scratch_satisfies_every_plan() {
        let today = date!(2026 - 10 - 17);
        let contents = vec![
            (
                ReportRequest::Collaboration(Box::new(exploration())),
                ReportContent::Collaboration(exploration()),
            ),
            (
                ReportRequest::Dashboard { year: Some(2025) },
                ReportContent::Dashboard(DashboardReport::default()),
            ),
            (
                ReportRequest::AiRecommendation { preloaded: None },
                ReportContent::AiRecommendation(RecommendationList::default()),
            ),
            (
                ReportRequest::Analytics {
                    filters: AnalyticsFilters::default(),
                },
                ReportContent::Analytics(AnalyticsReport::default()),
            ),
        ];
        for (request, content) in contents {
            let plan = request.plan();
            let scratch = content.compose(today);
            let pages = scratch.verify(&plan.expected_pages).unwrap();
            assert_eq!(pages.len(), plan.expected_pages.len());
        }
    }

    #[test]
    fn collaboration_filename_uses_both_titles() {
        let content = ReportContent::Collaboration(exploration());
        assert_eq!(
            content.filename("Kolaborasi", date!(2026 - 10 - 17)),
            "BRIDA_Kolaborasi_EHealth Surabaya_SIAK Terpadu_2026-10-17.pdf"
        );
    }
}
