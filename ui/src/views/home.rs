use dioxus::prelude::*;

use crate::{
    api::{AiInsight, ApiClient, DashboardCore, LoadState},
    components::charts::{ColumnChart, HorizontalBars, TrendChart},
    core::format::{format_count, format_number, today},
    report::{ReportModal, ReportRequest},
    t,
};

/// Years offered by the trend selector besides "all years".
pub const TREND_YEARS: [i32; 4] = [2022, 2023, 2024, 2025];

const CORE_FAILURE: &str = "Gagal memuat data dashboard. Silakan coba lagi.";
const TOP_ROWS: usize = 10;

/// Select value for a year option; empty means all years.
pub fn year_option_value(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

pub fn parse_year_option(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// The dashboard report needs the loaded aggregates.
pub fn can_export(core: &LoadState<DashboardCore>) -> bool {
    core.ready().is_some()
}

#[component]
pub fn Home() -> Element {
    let api = use_context::<ApiClient>();
    let mut year = use_signal(|| Option::<i32>::None);
    let mut report = use_signal(|| Option::<ReportRequest>::None);

    let mut core = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move { LoadState::from_result(api.dashboard_core().await, CORE_FAILURE) }
        })
    };
    let trend = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            let year = year();
            async move { api.trend_or_empty(year).await }
        })
    };
    let insights = use_resource(move || {
        let api = api.clone();
        async move { api.ai_insight_or_fallback().await }
    });

    let core_state: LoadState<DashboardCore> = core.read().clone().unwrap_or_default();
    let export_ready = can_export(&core_state);
    let trend_points = trend.read().clone();
    let insight_rows: Option<Vec<AiInsight>> = insights.read().clone();
    let selected = year();
    let trend_title = match selected {
        Some(y) => format!("Tren Penerapan Inovasi Per Bulan ({y})"),
        None => "Tren Penerapan Inovasi Per Tahun".to_string(),
    };
    let trend_empty = match selected {
        Some(y) => format!("Tidak ada data untuk tahun {y}"),
        None => "Belum ada data tren.".to_string(),
    };
    let new_label = format!("Inovasi Baru {}", selected.unwrap_or_else(|| today().year()));

    rsx! {
        section { class: "page page-home",
            header { class: "page__header",
                div {
                    h1 { {t!("dashboard-title")} }
                    p { {t!("dashboard-subtitle")} }
                }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: !export_ready,
                    onclick: move |_| report.set(Some(ReportRequest::Dashboard { year: year() })),
                    "Export PDF"
                }
            }

            {match core_state {
                LoadState::Loading => rsx! {
                    p { class: "card__placeholder", "Memuat data dashboard..." }
                },
                LoadState::Failed(message) | LoadState::Empty(message) => rsx! {
                    div { class: "notice notice--error",
                        p { "{message}" }
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| core.restart(),
                            "Coba Lagi"
                        }
                    }
                },
                LoadState::Ready(data) => rsx! {
                    div { class: "stat-grid",
                        StatTile { label: "Total Inovasi", value: format_count(data.stats.total), modifier: "blue" }
                        StatTile {
                            label: "Rata-rata Kematangan",
                            value: format_number(data.stats.average_maturity, 1),
                            modifier: "green",
                        }
                        StatTile { label: "Inovasi Digital", value: format_count(data.stats.digital), modifier: "purple" }
                        StatTile { label: new_label.clone(), value: format_count(data.stats.new_this_year), modifier: "orange" }
                    }
                    div { class: "dashboard-grid",
                        section { class: "card",
                            h2 { "Distribusi Tingkat Kematangan" }
                            ColumnChart {
                                columns: data.maturity.iter().map(|b| (b.level.clone(), b.count as f64)).collect::<Vec<_>>(),
                            }
                        }
                        section { class: "card",
                            h2 { "OPD dengan Inovasi Terbanyak" }
                            HorizontalBars {
                                rows: data.top_units.iter().take(TOP_ROWS).map(|r| (r.name.clone(), r.count as f64)).collect::<Vec<_>>(),
                                modifier: "purple",
                            }
                        }
                        section { class: "card",
                            h2 { "Urusan Pemerintahan Teratas" }
                            HorizontalBars {
                                rows: data.top_domains.iter().take(TOP_ROWS).map(|r| (r.name.clone(), r.count as f64)).collect::<Vec<_>>(),
                                modifier: "emerald",
                            }
                        }
                    }
                },
            }}

            section { class: "card trend-card",
                div { class: "card__header",
                    h2 { "{trend_title}" }
                    select {
                        class: "trend-card__year",
                        value: year_option_value(selected),
                        onchange: move |evt| year.set(parse_year_option(&evt.value())),
                        option { value: "", "Semua Tahun" }
                        for y in TREND_YEARS {
                            option { key: "{y}", value: "{y}", "Tahun {y}" }
                        }
                    }
                }
                {match trend_points {
                    None => rsx! { p { class: "card__placeholder", "Memuat tren..." } },
                    Some(points) => rsx! { TrendChart { points, empty_message: trend_empty } },
                }}
            }

            section { class: "card insights",
                h2 { "AI Insight" }
                {match insight_rows {
                    None => rsx! { p { class: "card__placeholder", "Memuat insight..." } },
                    Some(rows) => rsx! {
                        ul { class: "insights__list",
                            for (idx, insight) in rows.into_iter().enumerate() {
                                li {
                                    key: "{idx}",
                                    class: "insight {insight.kind.css_class()}",
                                    span { class: "insight__icon", "{insight.icon}" }
                                    span { class: "insight__text", "{insight.text}" }
                                }
                            }
                        }
                    },
                }}
            }

            if let Some(request) = report() {
                ReportModal { request, on_close: move |_| report.set(None) }
            }
        }
    }
}

#[component]
fn StatTile(label: String, value: String, modifier: &'static str) -> Element {
    rsx! {
        div { class: "stat-tile stat-tile--{modifier}",
            span { class: "stat-tile__label", "{label}" }
            strong { class: "stat-tile__value", "{value}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_option_round_trips_through_the_select() {
        assert_eq!(year_option_value(None), "");
        assert_eq!(parse_year_option(""), None);
        assert_eq!(parse_year_option(&year_option_value(Some(2024))), Some(2024));
    }

    #[test]
    fn export_waits_for_loaded_aggregates() {
        assert!(!can_export(&LoadState::Loading));
        assert!(!can_export(&LoadState::Failed("Gagal memuat data".into())));
        assert!(can_export(&LoadState::Ready(DashboardCore::default())));
    }
}
