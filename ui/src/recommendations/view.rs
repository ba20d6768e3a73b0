use std::rc::Rc;

use dioxus::prelude::*;

use super::{canned_reply, open_detail, retry_reply, run_exploration, ChatKind, ChatLog};
use crate::{
    api::{
        ApiClient, CollaborationDetailRecord, CollaborationRecommendation, DetailSide,
        ExplorationResult, LoadState, RecommendationList,
    },
    components::selector::{SearchableSelect, SelectorOption},
    core::{
        format::format_run_timestamp,
        platform::scroll_into_view,
        score::LevelTier,
        timing::sleep_ms,
    },
    report::{ReportModal, ReportRequest, SettlePolicy},
    t,
    views::CollaborationAnalysis,
};

/// Recommendations requested on mount.
pub const RECOMMENDATION_LIMIT: usize = 10;

const LIST_FAILURE: &str = "Gagal memuat rekomendasi kolaborasi. Silakan coba lagi.";
const CATALOGUE_FAILURE: &str = "Daftar inovasi tidak dapat dimuat.";
const NOTHING_TO_RETRY: &str = "Belum ada rekomendasi yang dapat diringkas.";

#[component]
pub fn RecommendationsPage() -> Element {
    let api = use_context::<ApiClient>();
    let mut report = use_signal(|| Option::<ReportRequest>::None);
    let mut detail = use_signal(|| Option::<CollaborationDetailRecord>::None);
    let mut opening = use_signal(|| Option::<u64>::None);

    let mut recommendations = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move {
                LoadState::from_result(
                    api.top_recommendations(RECOMMENDATION_LIMIT).await,
                    LIST_FAILURE,
                )
            }
        })
    };
    let list_state: LoadState<RecommendationList> =
        recommendations.read().clone().unwrap_or_default();
    let top = list_state.ready().and_then(|list| list.top().cloned());

    let open = move |rec: CollaborationRecommendation| {
        let api = api.clone();
        opening.set(Some(rec.cluster_id));
        spawn(async move {
            let record = open_detail(&api, &rec).await;
            opening.set(None);
            detail.set(Some(record));
        });
    };

    if let Some(record) = detail() {
        return rsx! {
            RecommendationDetail {
                record,
                on_back: move |_| detail.set(None),
            }
        };
    }

    let preloaded = list_state.ready().cloned();

    rsx! {
        section { class: "page page-recommendations",
            header { class: "page__header",
                h1 { {t!("recommendations-title")} }
                p { {t!("recommendations-subtitle")} }
            }

            section { class: "card recommendations",
                div { class: "card__header",
                    h2 { "Rekomendasi Kolaborasi AI" }
                    if let Some(list) = preloaded.clone() {
                        button {
                            r#type: "button",
                            class: "button button--primary",
                            onclick: move |_| report.set(Some(ReportRequest::AiRecommendation {
                                preloaded: Some(list.clone()),
                            })),
                            "Export PDF"
                        }
                    }
                }

                {match list_state {
                    LoadState::Loading => rsx! {
                        p { class: "card__placeholder", "Memuat rekomendasi..." }
                    },
                    LoadState::Failed(message) => rsx! {
                        div { class: "notice notice--error",
                            p { "{message}" }
                            button {
                                r#type: "button",
                                class: "button",
                                onclick: move |_| recommendations.restart(),
                                "Coba Lagi"
                            }
                        }
                    },
                    LoadState::Empty(message) => rsx! {
                        p { class: "notice notice--empty", "{message}" }
                    },
                    LoadState::Ready(list) => rsx! {
                        if let Some(last_run) = list.last_run.as_deref() {
                            p { class: "card__meta",
                                "Clustering terakhir: {format_run_timestamp(last_run)}"
                            }
                        }
                        ol { class: "recommendation-list",
                            for (idx, rec) in list.items.into_iter().enumerate() {
                                RecommendationCard {
                                    key: "{rec.cluster_id}-{idx}",
                                    rank: idx + 1,
                                    busy: opening() == Some(rec.cluster_id),
                                    rec: rec.clone(),
                                    on_open: {
                                        let mut open = open.clone();
                                        move |rec: CollaborationRecommendation| open(rec)
                                    },
                                    on_export: move |rec: CollaborationRecommendation| {
                                        report.set(Some(ReportRequest::AiRecommendation {
                                            preloaded: Some(RecommendationList {
                                                items: vec![rec],
                                                last_run: None,
                                            }),
                                        }))
                                    },
                                }
                            }
                        }
                    },
                }}
            }

            ExplorationPanel { on_export: move |result: ExplorationResult| {
                report.set(Some(ReportRequest::Collaboration(Box::new(result))))
            } }

            ChatPanel { top }

            if let Some(request) = report() {
                ReportModal { request, on_close: move |_| report.set(None) }
            }
        }
    }
}

#[component]
fn RecommendationCard(
    rank: usize,
    rec: CollaborationRecommendation,
    busy: bool,
    on_open: EventHandler<CollaborationRecommendation>,
    on_export: EventHandler<CollaborationRecommendation>,
) -> Element {
    let tier = rec.tier();
    let percentage = rec.percentage();
    let label = rec.label();
    let a = rec.innovation_a.clone();
    let b = rec.innovation_b.clone();
    let open_rec = rec.clone();

    rsx! {
        li { class: "recommendation-card",
            span { class: "recommendation-card__rank", "{rank}" }
            div { class: "recommendation-card__body",
                h3 { class: "recommendation-card__title", "{a.title} × {b.title}" }
                dl { class: "recommendation-card__facts",
                    dt { "Urusan" }
                    dd { "{a.domain} / {b.domain}" }
                    dt { "Tahap" }
                    dd { "{a.stage} / {b.stage}" }
                    dt { "Kematangan" }
                    dd { "{a.maturity_label} / {b.maturity_label}" }
                }
            }
            div { class: "recommendation-card__score",
                span { class: "score-badge {tier.css_class()}", "{percentage}%" }
                span { class: "recommendation-card__label", "{label}" }
                button {
                    r#type: "button",
                    class: "button button--accent",
                    disabled: busy,
                    onclick: move |_| on_open.call(open_rec.clone()),
                    if busy { "Memuat..." } else { "Lihat Detail" }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| on_export.call(rec.clone()),
                    "PDF"
                }
            }
        }
    }
}

#[component]
fn RecommendationDetail(record: CollaborationDetailRecord, on_back: EventHandler<()>) -> Element {
    let tier = record.tier();
    let percentage = record.percentage();

    rsx! {
        section { class: "page page-recommendation-detail",
            button {
                r#type: "button",
                class: "button button--ghost",
                onclick: move |_| on_back.call(()),
                "← Kembali"
            }
            header { class: "page__header",
                h1 { "Detail Rekomendasi Kolaborasi" }
                span { class: "score-badge {tier.css_class()}", "{percentage}% · {tier.label()}" }
            }
            div { class: "detail-sides",
                DetailSideCard { side: record.side_a.clone(), heading: "Inovasi 1" }
                DetailSideCard { side: record.side_b.clone(), heading: "Inovasi 2" }
            }
            CollaborationAnalysis { first: record.side_a.id, second: record.side_b.id }
        }
    }
}

#[component]
fn DetailSideCard(side: DetailSide, heading: &'static str) -> Element {
    rsx! {
        article { class: "card detail-side",
            span { class: "detail-side__heading", "{heading}" }
            h3 { "{side.title}" }
            dl { class: "detail-side__facts",
                dt { "OPD" }
                dd { "{side.owning_unit}" }
                dt { "Urusan" }
                dd { "{side.domain}" }
                dt { "Tahap" }
                dd { "{side.stage}" }
                dt { "Kematangan" }
                dd { "{side.maturity_label}" }
            }
        }
    }
}

#[component]
fn ExplorationPanel(on_export: EventHandler<ExplorationResult>) -> Element {
    let api = use_context::<ApiClient>();
    let settle = try_use_context::<SettlePolicy>().unwrap_or_default();
    let mut first = use_signal(|| Option::<u64>::None);
    let mut second = use_signal(|| Option::<u64>::None);
    let mut running = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut result = use_signal(|| Option::<ExplorationResult>::None);
    let mut result_node = use_signal(|| Option::<Rc<MountedData>>::None);

    let catalogue = {
        let api = api.clone();
        use_resource(move || {
            let api = api.clone();
            async move { api.innovations().await }
        })
    };
    let (options, catalogue_error) = match &*catalogue.read() {
        Some(Ok(rows)) => (
            rows.iter()
                .map(|row| SelectorOption::new(row.id, row.title.clone()))
                .collect::<Vec<_>>(),
            None,
        ),
        Some(Err(_)) => (Vec::new(), Some(CATALOGUE_FAILURE)),
        None => (Vec::new(), None),
    };

    let submit = move |_: MouseEvent| {
        if running() {
            return;
        }
        let api = api.clone();
        let rows = catalogue
            .read()
            .as_ref()
            .and_then(|loaded| loaded.as_ref().ok())
            .cloned()
            .unwrap_or_default();
        error.set(None);
        spawn(async move {
            running.set(true);
            match run_exploration(&api, &rows, first(), second()).await {
                Ok(found) => {
                    result.set(Some(found));
                    sleep_ms(settle.scroll_ms).await;
                    if let Some(node) = result_node() {
                        scroll_into_view(&node).await;
                    }
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            running.set(false);
        });
    };

    rsx! {
        section { class: "card exploration",
            div { class: "card__header",
                h2 { "Eksplorasi Kolaborasi" }
            }
            if let Some(message) = catalogue_error {
                p { class: "notice notice--error", "{message}" }
            }
            div { class: "exploration__selectors",
                SearchableSelect {
                    label: "Inovasi Pertama",
                    options: options.clone(),
                    value: first(),
                    on_change: move |id| first.set(Some(id)),
                }
                SearchableSelect {
                    label: "Inovasi Kedua",
                    options,
                    value: second(),
                    on_change: move |id| second.set(Some(id)),
                }
            }
            button {
                r#type: "button",
                class: "button button--primary",
                disabled: running(),
                onclick: submit,
                if running() { "Menganalisis..." } else { "Analisis Kolaborasi" }
            }
            if let Some(message) = error() {
                div { class: "notice notice--error exploration__error",
                    span { "{message}" }
                    button {
                        r#type: "button",
                        class: "notice__dismiss",
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }
            if let Some(found) = result() {
                div {
                    class: "exploration__result",
                    onmounted: move |evt| result_node.set(Some(evt.data())),
                    ExplorationResultPanel { result: found.clone() }
                    button {
                        r#type: "button",
                        class: "button button--accent",
                        onclick: {
                            let found = found.clone();
                            move |_| on_export.call(found.clone())
                        },
                        "Export PDF Hasil Eksplorasi"
                    }
                }
            }
        }
    }
}

#[component]
fn ExplorationResultPanel(result: ExplorationResult) -> Element {
    let tier = result.tier();
    let level_class = LevelTier::classify(&result.collaboration_level).css_class();

    rsx! {
        article { class: "exploration-result",
            h3 { class: "exploration-result__title", "{result.title}" }
            div { class: "exploration-result__pair",
                div { class: "exploration-result__side",
                    strong { "{result.side_a.title}" }
                    span { "{result.side_a.owning_unit}" }
                }
                span { class: "exploration-result__join", "×" }
                div { class: "exploration-result__side",
                    strong { "{result.side_b.title}" }
                    span { "{result.side_b.owning_unit}" }
                }
            }
            div { class: "exploration-result__score",
                span { class: "score-badge {tier.css_class()}", "{result.score_percent}%" }
                span { "{tier.label()}" }
                span { class: "level-tag {level_class}", "{result.collaboration_level}" }
            }
            h4 { "Manfaat Kolaborasi" }
            ol {
                for item in result.benefits.iter() {
                    li { "{item}" }
                }
            }
            h4 { "Alasan Kecocokan" }
            p { "{result.rationale}" }
            h4 { "Dampak Potensial" }
            ol {
                for item in result.impacts.iter() {
                    li { "{item}" }
                }
            }
        }
    }
}

#[component]
fn ChatPanel(#[props(!optional)] top: Option<CollaborationRecommendation>) -> Element {
    let settle = try_use_context::<SettlePolicy>().unwrap_or_default();
    let mut log = use_signal(ChatLog::default);
    let mut draft = use_signal(String::new);
    let typing = log.read().is_typing();

    let mut reply_later = move |reply: String| {
        let placeholder = log.write().begin_typing();
        spawn(async move {
            sleep_ms(settle.chat_reply_ms).await;
            log.write().resolve_typing(&placeholder, reply);
        });
    };

    let send = {
        let top = top.clone();
        move || {
            let text = draft();
            if log.write().push_user(&text) {
                draft.set(String::new());
                reply_later(canned_reply(top.as_ref()));
            }
        }
    };

    let retry = move |_: MouseEvent| match retry_reply(top.as_ref()) {
        Some(reply) => reply_later(reply),
        None => log.write().push_error(NOTHING_TO_RETRY),
    };

    rsx! {
        section { class: "card chat",
            div { class: "card__header",
                h2 { "Asisten Kolaborasi" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: typing,
                    onclick: retry,
                    "Ulangi Ringkasan"
                }
            }
            ul { class: "chat__log",
                for message in log.read().messages().iter() {
                    li {
                        key: "{message.id}",
                        class: "chat-message {message.kind.css_class()}",
                        if message.kind == ChatKind::Typing {
                            span { class: "chat-message__dots", "..." }
                        } else {
                            "{message.text}"
                        }
                    }
                }
            }
            form {
                class: "chat__form",
                onsubmit: {
                    let mut send = send.clone();
                    move |evt: FormEvent| {
                        evt.prevent_default();
                        send();
                    }
                },
                input {
                    r#type: "text",
                    class: "chat__input",
                    placeholder: "Tanyakan tentang rekomendasi kolaborasi...",
                    value: "{draft}",
                    oninput: move |evt| draft.set(evt.value()),
                }
                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: typing,
                    "Kirim"
                }
            }
        }
    }
}
