#![cfg(test)]
/*!
Selector lint for the shared theme embedded in desktop builds.

Rust components reference these classes by name; a refactor that drops one
from `ui/assets/theme/main.css` would otherwise only degrade styling at
runtime. Substring presence is enough for an early warning.

When a selector is renamed on purpose, update the component markup and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".card {",
    ".dashboard-grid",
    // Buttons & notices
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--ghost",
    ".notice--error",
    ".notice--empty",
    // Dashboard
    ".stat-tile",
    ".stat-tile__value",
    ".hbars__fill",
    ".columns__fill",
    ".trend__bar--digital",
    ".trend__bar--nondigital",
    ".trend__bar--technology",
    ".insight--success",
    ".insight--warning",
    ".insight--info",
    // Recommendations
    ".recommendation-card",
    ".recommendation-card__rank",
    ".score-badge--excellent",
    ".score-badge--promising",
    ".score-badge--fair",
    ".level-tag--replication",
    ".level-tag--collaboration",
    ".level-tag--other",
    ".selector__option--active",
    ".exploration-result__pair",
    ".collaboration__disclaimer",
    ".chat-message--user",
    ".chat-message--bot",
    ".chat-message--error",
    // Report progress
    ".report-modal__dialog",
    ".report-modal__bar",
    ".report-modal__status",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn tier_badges_and_level_tags_are_paired() {
    let badges = [".score-badge--excellent", ".score-badge--promising", ".score-badge--fair"]
        .iter()
        .all(|sel| THEME_CSS.contains(sel));
    let base = THEME_CSS.contains(".score-badge {") && THEME_CSS.contains(".level-tag {");
    assert!(
        badges && base,
        "Score badge styling incomplete (tiers: {badges}, base rules: {base})"
    );
}
