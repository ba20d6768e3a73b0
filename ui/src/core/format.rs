//! Formatting helpers for presenting metrics, dates, and file names.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, Month,
    OffsetDateTime, PrimitiveDateTime,
};

/// Percent string for a fraction in `[0, 1]`.
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return "—".into();
    }
    format!("{}%", crate::core::score::percentage(fraction))
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    format!("{value:.decimals$}")
}

/// Integer with Indonesian thousands separators (`12.345`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn month_name_id(month: Month) -> &'static str {
    match month {
        Month::January => "Januari",
        Month::February => "Februari",
        Month::March => "Maret",
        Month::April => "April",
        Month::May => "Mei",
        Month::June => "Juni",
        Month::July => "Juli",
        Month::August => "Agustus",
        Month::September => "September",
        Month::October => "Oktober",
        Month::November => "November",
        Month::December => "Desember",
    }
}

/// Short month labels used on chart axes (`1 → "Jan"`, `8 → "Agu"`).
pub fn month_short_id(month: u8) -> &'static str {
    const LABELS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
    ];
    LABELS
        .get(usize::from(month).wrapping_sub(1))
        .copied()
        .unwrap_or("—")
}

/// Long Indonesian date, e.g. `17 Oktober 2026`.
pub fn format_long_date(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_name_id(date.month()),
        date.year()
    )
}

pub fn format_iso_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "0000-00-00".into())
}

/// Render a backend `last_run` stamp. Accepts RFC 3339 as well as the
/// offset-less ISO strings Python's `isoformat()` produces.
pub fn format_run_timestamp(raw: &str) -> String {
    parse_loose_timestamp(raw)
        .map(|ts| {
            format!(
                "{} {:02}.{:02}",
                format_long_date(ts.date()),
                ts.hour(),
                ts.minute()
            )
        })
        .unwrap_or_else(|| raw.to_string())
}

pub(crate) fn parse_loose_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let without_fraction = raw.split('.').next().unwrap_or(raw);
    PrimitiveDateTime::parse(
        without_fraction,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .ok()
    .map(PrimitiveDateTime::assume_utc)
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub fn timestamp_slug() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Keep ASCII letters, digits and spaces, then cut to `max_chars`.
pub fn filename_fragment(raw: &str, max_chars: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .take(max_chars)
        .collect::<String>()
        .trim()
        .to_string()
}
