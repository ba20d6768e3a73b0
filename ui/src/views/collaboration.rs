use dioxus::prelude::*;

use crate::{
    api::{ApiClient, CollaborationInsight, LoadState, AI_ANALYSIS_DISCLAIMER},
    core::score::LevelTier,
};

const ANALYSIS_FAILURE: &str = "Gagal memuat analisis kolaborasi AI.";

/// AI analysis of a recommended pair. Refetches whenever the pair changes.
#[component]
pub fn CollaborationAnalysis(first: u64, second: u64) -> Element {
    let api = use_context::<ApiClient>();
    let mut analysis = use_resource(use_reactive!(|(first, second)| {
        let api = api.clone();
        async move {
            LoadState::from_result(api.ai_collaboration(first, second).await, ANALYSIS_FAILURE)
        }
    }));
    let state: LoadState<CollaborationInsight> = analysis.read().clone().unwrap_or_default();

    rsx! {
        section { class: "card collaboration",
            div { class: "card__header",
                h2 { "Analisis Kolaborasi AI" }
            }
            {match state {
                LoadState::Loading => rsx! {
                    p { class: "card__placeholder", "Menganalisis potensi kolaborasi..." }
                },
                LoadState::Failed(message) | LoadState::Empty(message) => rsx! {
                    div { class: "notice notice--error",
                        p { "{message}" }
                        button {
                            r#type: "button",
                            class: "button",
                            onclick: move |_| analysis.restart(),
                            "Coba Lagi"
                        }
                    }
                },
                LoadState::Ready(insight) => rsx! {
                    InsightBody { insight }
                },
            }}
        }
    }
}

#[component]
fn InsightBody(insight: CollaborationInsight) -> Element {
    let level_class = LevelTier::classify(&insight.recommendation_level).css_class();

    rsx! {
        article { class: "collaboration__body",
            h3 { class: "collaboration__title", "{insight.title}" }
            if !insight.involved_units.is_empty() {
                div { class: "collaboration__units",
                    for unit in insight.involved_units.iter() {
                        span { class: "unit-tag", "{unit}" }
                    }
                }
            }
            if !insight.recommendation_level.is_empty() {
                p { class: "collaboration__level",
                    "Tingkat Rekomendasi: "
                    span { class: "level-tag {level_class}", "{insight.recommendation_level}" }
                }
            }
            div { class: "collaboration__section collaboration__section--rationale",
                h4 { "Alasan Kesesuaian" }
                p { "{insight.rationale}" }
            }
            div { class: "collaboration__columns",
                div { class: "collaboration__section collaboration__section--benefits",
                    h4 { "Manfaat Kolaborasi" }
                    ul {
                        for item in insight.benefits.iter() {
                            li { "{item}" }
                        }
                    }
                }
                div { class: "collaboration__section collaboration__section--impacts",
                    h4 { "Potensi Dampak" }
                    ul {
                        for item in insight.impacts.iter() {
                            li { "{item}" }
                        }
                    }
                }
            }
            p { class: "collaboration__disclaimer", "{AI_ANALYSIS_DISCLAIMER}" }
        }
    }
}
