//! Searchable single-choice selector over `(id, title)` options.

use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOption {
    pub id: u64,
    pub title: String,
}

impl SelectorOption {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

pub const NO_RESULTS: &str = "Tidak ada hasil";
pub const PLACEHOLDER: &str = "Pilih inovasi";

/// Case-insensitive substring match on titles, whitespace included. An empty
/// query keeps everything.
pub fn filter_options<'a>(options: &'a [SelectorOption], query: &str) -> Vec<&'a SelectorOption> {
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|opt| needle.is_empty() || opt.title.to_lowercase().contains(&needle))
        .collect()
}

/// Open/filter state, kept separate from rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorState {
    pub open: bool,
    pub query: String,
}

impl SelectorState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Choosing an option closes the panel and clears the filter.
    pub fn select(&mut self, id: u64) -> u64 {
        self.dismiss();
        id
    }

    /// Pointer-down outside the open panel.
    pub fn dismiss(&mut self) {
        self.open = false;
        self.query.clear();
    }
}

#[component]
pub fn SearchableSelect(
    label: String,
    options: Vec<SelectorOption>,
    #[props(!optional)]
    value: Option<u64>,
    on_change: EventHandler<u64>,
) -> Element {
    let mut state = use_signal(SelectorState::default);

    let selected_label = value
        .and_then(|id| options.iter().find(|opt| opt.id == id))
        .map(|opt| opt.title.clone())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    let current = state();
    let visible: Vec<SelectorOption> = filter_options(&options, &current.query)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div { class: "selector",
            label { class: "selector__label", "{label}" }
            button {
                r#type: "button",
                class: "selector__trigger",
                onclick: move |_| state.write().toggle(),
                span { class: "selector__value", "{selected_label}" }
                span { class: "selector__icon", aria_hidden: "true", "⌕" }
            }

            if current.open {
                // Full-screen catcher: any pointer-down outside the panel lands here.
                div {
                    class: "selector__backdrop",
                    onmousedown: move |_| state.write().dismiss(),
                }
                div { class: "selector__panel",
                    div { class: "selector__search",
                        input {
                            r#type: "text",
                            class: "selector__input",
                            placeholder: "Ketik untuk mencari...",
                            value: "{current.query}",
                            oninput: move |evt| state.write().set_query(evt.value()),
                        }
                        if !current.query.is_empty() {
                            button {
                                r#type: "button",
                                class: "selector__clear",
                                onclick: move |_| state.write().set_query(""),
                                "×"
                            }
                        }
                    }
                    ul { class: "selector__options",
                        if visible.is_empty() {
                            li { class: "selector__empty", "{NO_RESULTS}" }
                        }
                        for opt in visible.into_iter() {
                            li {
                                key: "{opt.id}",
                                class: if value == Some(opt.id) { "selector__option selector__option--active" } else { "selector__option" },
                                onclick: move |_| {
                                    let id = state.write().select(opt.id);
                                    on_change.call(id);
                                },
                                "{opt.title}"
                            }
                        }
                    }
                }
            }
        }
    }
}
