//! Lightweight HTML/CSS charts for the dashboard pages.

use dioxus::prelude::*;

use crate::{api::TrendPoint, core::format};

/// Share of `max` as a CSS percentage, `0..=100`.
pub fn bar_share(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max * 100.0).clamp(0.0, 100.0)
}

fn bar_style(axis: &str, value: f64, max: f64) -> String {
    format!("{axis}: {:.1}%", bar_share(value, max))
}

/// Ranked horizontal bars, longest first as supplied.
#[component]
pub fn HorizontalBars(rows: Vec<(String, f64)>, modifier: &'static str) -> Element {
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    rsx! {
        ul { class: "hbars hbars--{modifier}",
            if rows.is_empty() {
                li { class: "hbars__empty", "Belum ada data." }
            }
            for (label, value) in rows.into_iter() {
                li { class: "hbars__row",
                    span { class: "hbars__label", "{label}" }
                    span { class: "hbars__track",
                        span {
                            class: "hbars__fill",
                            style: bar_style("width", value, max),
                        }
                    }
                    span { class: "hbars__value", "{format::format_number(value, 0)}" }
                }
            }
        }
    }
}

/// Vertical columns, one per bucket.
#[component]
pub fn ColumnChart(columns: Vec<(String, f64)>) -> Element {
    let max = columns.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    rsx! {
        div { class: "columns",
            for (label, value) in columns.into_iter() {
                div { class: "columns__item",
                    span { class: "columns__value", "{format::format_number(value, 0)}" }
                    span { class: "columns__track",
                        span {
                            class: "columns__fill",
                            style: bar_style("height", value, max),
                        }
                    }
                    span { class: "columns__label", "{label}" }
                }
            }
        }
    }
}

/// Grouped digital / non-digital / technology columns per trend point.
#[component]
pub fn TrendChart(points: Vec<TrendPoint>, empty_message: String) -> Element {
    let max = points
        .iter()
        .flat_map(|p| [p.digital, p.non_digital, p.technology])
        .max()
        .unwrap_or(0) as f64;

    if points.is_empty() {
        return rsx! {
            p { class: "card__placeholder", "{empty_message}" }
        };
    }

    rsx! {
        div { class: "trend",
            div { class: "trend__plot",
                for point in points.into_iter() {
                    div { class: "trend__group",
                        div { class: "trend__bars",
                            span {
                                class: "trend__bar trend__bar--digital",
                                title: "Digital: {point.digital}",
                                style: bar_style("height", point.digital as f64, max),
                            }
                            span {
                                class: "trend__bar trend__bar--nondigital",
                                title: "Non-Digital: {point.non_digital}",
                                style: bar_style("height", point.non_digital as f64, max),
                            }
                            span {
                                class: "trend__bar trend__bar--technology",
                                title: "Teknologi: {point.technology}",
                                style: bar_style("height", point.technology as f64, max),
                            }
                        }
                        span { class: "trend__label", "{point.label}" }
                    }
                }
            }
            div { class: "trend__legend",
                span { class: "trend__key trend__key--digital", "Digital" }
                span { class: "trend__key trend__key--nondigital", "Non-Digital" }
                span { class: "trend__key trend__key--technology", "Teknologi" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_the_axis() {
        assert_eq!(bar_style("width", 1.0, 4.0), "width: 25.0%");
    }

    #[test]
    fn share_is_clamped_and_safe() {
        assert_eq!(bar_share(5.0, 10.0), 50.0);
        assert_eq!(bar_share(12.0, 10.0), 100.0);
        assert_eq!(bar_share(3.0, 0.0), 0.0);
        assert_eq!(bar_share(f64::NAN, 10.0), 0.0);
    }
}
