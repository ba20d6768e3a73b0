//! Translation completeness.
//!
//! id-ID is the fallback locale: every other locale must define all of its
//! keys, and every literal `t!("...")` key in `src/` must exist in it.
//! New locales go into `LOCALES` below.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK: &str = include_str!("../i18n/id-ID/sinergi_ui.ftl");
const LOCALES: &[(&str, &str)] = &[("en-US", include_str!("../i18n/en-US/sinergi_ui.ftl"))];

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback_keys = extract_keys(FALLBACK);
    assert!(!fallback_keys.is_empty(), "Fallback (id-ID) contains no keys.");
    assert_no_dup_keys(FALLBACK, "id-ID");

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        assert_no_dup_keys(src, locale);
        let keys = extract_keys(src);
        let missing: BTreeSet<_> = fallback_keys.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from id-ID, then translate.",
            failures.join("\n\n")
        );
    }
}

/// `fl!` resolves the domain from the package name with `-` turned into `_`.
#[test]
fn bundles_are_named_after_the_fluent_domain() {
    let domain = env!("CARGO_PKG_NAME").replace('-', "_");
    let i18n_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("i18n");
    for locale in std::iter::once("id-ID").chain(LOCALES.iter().map(|(locale, _)| *locale)) {
        let bundle = i18n_root.join(locale).join(format!("{domain}.ftl"));
        assert!(bundle.is_file(), "missing bundle {}", bundle.display());
    }
}

#[test]
fn referenced_keys_exist_in_fallback() {
    let fallback_keys = extract_keys(FALLBACK);
    let src_root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let referenced = referenced_keys(&src_root);
    assert!(
        referenced.contains("brand"),
        "source scan found no navbar keys; did the macro name change?"
    );

    let missing: BTreeSet<_> = referenced.difference(&fallback_keys).cloned().collect();
    assert!(
        missing.is_empty(),
        "Referenced translation keys missing in id-ID ({}):\n{}",
        missing.len(),
        missing.into_iter().collect::<Vec<_>>().join("\n")
    );
}

/// Message keys from a Fluent file: any `key =` line that is not a comment,
/// term, or attribute.
fn extract_keys(src: &str) -> HashSet<String> {
    src.lines()
        .filter_map(message_key)
        .map(str::to_string)
        .collect()
}

fn message_key(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(['#', '.', '-']) {
        return None;
    }
    let key = line[..line.find('=')?].trim();
    (!key.is_empty() && key.chars().all(valid_key_char)).then_some(key)
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let dups: BTreeSet<_> = src
        .lines()
        .filter_map(message_key)
        .filter(|key| !seen.insert(*key))
        .collect();
    assert!(
        dups.is_empty(),
        "Duplicate key definitions in {locale}:\n  {}",
        dups.into_iter().collect::<Vec<_>>().join("\n  ")
    );
}

/// Literal first arguments of `t!("...")` across the source tree. Dynamic ids
/// and direct `fl!` calls are not seen.
fn referenced_keys(src_root: &Path) -> HashSet<String> {
    const NEEDLE: &str = "t!(\"";
    let mut found = HashSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|e| e.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let mut rest = content.as_str();
        while let Some(pos) = rest.find(NEEDLE) {
            rest = &rest[pos + NEEDLE.len()..];
            if let Some(end) = rest.find('"') {
                let key = &rest[..end];
                if key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
                rest = &rest[end..];
            }
        }
    }

    found
}
