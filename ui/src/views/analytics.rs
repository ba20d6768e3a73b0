use dioxus::prelude::*;

use super::home::{parse_year_option, year_option_value, TREND_YEARS};
use crate::{
    api::{AnalyticsFilters, ApiClient, LoadState, MaturityBucket, RankedCount},
    components::charts::{ColumnChart, HorizontalBars, TrendChart},
    report::{ReportModal, ReportRequest},
    t,
};

pub const INNOVATION_KINDS: [&str; 3] = ["Digital", "Non-Digital", "Teknologi"];
pub const INNOVATION_FORMS: [&str; 3] = ["Tata Kelola Pemerintahan", "Pelayanan Publik", "Bentuk Lainnya"];

const AGGREGATE_FAILURE: &str = "Gagal memuat data analitik. Silakan coba lagi.";

type Aggregates = (Vec<MaturityBucket>, Vec<RankedCount>, Vec<RankedCount>);

/// Empty select value clears the filter.
fn choice(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn Analytics() -> Element {
    let api = use_context::<ApiClient>();
    let mut filters = use_signal(AnalyticsFilters::default);
    let mut report = use_signal(|| Option::<ReportRequest>::None);

    let mut aggregates = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move {
                let joined = futures::try_join!(api.maturity(), api.top_units(), api.top_domains());
                LoadState::<Aggregates>::from_result(joined, AGGREGATE_FAILURE)
            }
        })
    };
    let trend = use_resource(move || {
        let api = api.clone();
        let year = filters.read().year;
        async move { api.trend_or_empty(year).await }
    });

    let state = aggregates.read().clone().unwrap_or_default();
    let current = filters();
    let units: Vec<String> = state
        .ready()
        .map(|(_, units, _)| units.iter().map(|u| u.name.clone()).collect())
        .unwrap_or_default();
    let trend_points = trend.read().clone();

    rsx! {
        section { class: "page page-analytics",
            header { class: "page__header",
                div {
                    h1 { {t!("analytics-title")} }
                    p { {t!("analytics-subtitle")} }
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| report.set(Some(ReportRequest::Analytics { filters: filters() })),
                    "Export PDF"
                }
            }

            section { class: "card filters",
                label { class: "filters__field",
                    span { "Tahun" }
                    select {
                        value: year_option_value(current.year),
                        onchange: move |evt| filters.write().year = parse_year_option(&evt.value()),
                        option { value: "", "Semua" }
                        for y in TREND_YEARS {
                            option { key: "{y}", value: "{y}", "{y}" }
                        }
                    }
                }
                label { class: "filters__field",
                    span { "OPD" }
                    select {
                        value: current.unit.clone().unwrap_or_default(),
                        onchange: move |evt| filters.write().unit = choice(evt.value()),
                        option { value: "", "Semua" }
                        for unit in units {
                            option { key: "{unit}", value: "{unit}", "{unit}" }
                        }
                    }
                }
                label { class: "filters__field",
                    span { "Jenis Inovasi" }
                    select {
                        value: current.kind.clone().unwrap_or_default(),
                        onchange: move |evt| filters.write().kind = choice(evt.value()),
                        option { value: "", "Semua" }
                        for kind in INNOVATION_KINDS {
                            option { key: "{kind}", value: "{kind}", "{kind}" }
                        }
                    }
                }
                label { class: "filters__field",
                    span { "Bentuk Inovasi" }
                    select {
                        value: current.form.clone().unwrap_or_default(),
                        onchange: move |evt| filters.write().form = choice(evt.value()),
                        option { value: "", "Semua" }
                        for form in INNOVATION_FORMS {
                            option { key: "{form}", value: "{form}", "{form}" }
                        }
                    }
                }
                if !current.is_unfiltered() {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| filters.set(AnalyticsFilters::default()),
                        "Reset Filter"
                    }
                }
            }

            {match state {
                LoadState::Loading => rsx! {
                    p { class: "card__placeholder", "Memuat data analitik..." }
                },
                LoadState::Failed(message) | LoadState::Empty(message) => rsx! {
                    div { class: "notice notice--error",
                        p { "{message}" }
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| aggregates.restart(),
                            "Coba Lagi"
                        }
                    }
                },
                LoadState::Ready((maturity, top_units, top_domains)) => rsx! {
                    div { class: "dashboard-grid",
                        section { class: "card",
                            h2 { "Distribusi Tingkat Kematangan" }
                            ColumnChart {
                                columns: maturity.iter().map(|b| (b.level.clone(), b.count as f64)).collect::<Vec<_>>(),
                            }
                        }
                        section { class: "card",
                            h2 { "OPD dengan Inovasi Terbanyak" }
                            HorizontalBars {
                                rows: top_units.iter().map(|r| (r.name.clone(), r.count as f64)).collect::<Vec<_>>(),
                                modifier: "purple",
                            }
                        }
                        section { class: "card",
                            h2 { "Urusan Pemerintahan Teratas" }
                            HorizontalBars {
                                rows: top_domains.iter().map(|r| (r.name.clone(), r.count as f64)).collect::<Vec<_>>(),
                                modifier: "emerald",
                            }
                        }
                    }
                },
            }}

            section { class: "card trend-card",
                h2 { "Tren Inovasi" }
                {match trend_points {
                    None => rsx! { p { class: "card__placeholder", "Memuat tren..." } },
                    Some(points) => rsx! {
                        TrendChart { points, empty_message: "Belum ada data tren.".to_string() }
                    },
                }}
            }

            if let Some(request) = report() {
                ReportModal { request, on_close: move |_| report.set(None) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_choice_clears_the_filter() {
        assert_eq!(choice(String::new()), None);
        assert_eq!(choice("  ".into()), None);
        assert_eq!(choice("Digital".into()), Some("Digital".into()));
    }
}
