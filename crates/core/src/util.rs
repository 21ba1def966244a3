//! Small helpers shared by the bot layers.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

const RANDOM_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Parse a signed integer, `None` when the text is not one.
pub fn parse_int(text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Parse int error for {:?}: {}", text, e);
            None
        }
    }
}

/// Random ASCII alphanumeric string of `len` characters.
pub fn random_str(len: usize) -> String {
    (0..len)
        .map(|_| RANDOM_ALPHABET[fastrand::usize(..RANDOM_ALPHABET.len())] as char)
        .collect()
}

/// Current Unix time in seconds.
pub fn now_secs() -> i64 {
    Utc::now().timestamp()
}

/// Format `secs` in local time with `format`; `None` formats the current
/// time. An invalid format or out-of-range timestamp gives `""`.
pub fn readable_time(secs: Option<i64>, format: &str) -> String {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::debug!("Invalid time format {:?}", format);
        return String::new();
    }

    let time = match secs {
        Some(secs) => match DateTime::<Utc>::from_timestamp(secs, 0) {
            Some(dt) => dt.with_timezone(&Local),
            None => return String::new(),
        },
        None => Local::now(),
    };

    let mut out = String::new();
    if write!(out, "{}", time.format_with_items(items.iter())).is_err() {
        return String::new();
    }
    out
}
