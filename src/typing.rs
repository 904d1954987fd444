//! Typing speed for the text-entry view.

use chrono::{DateTime, Utc};

/// Words per minute typed between `started_at` and `now`.
///
/// `None` when no time has elapsed (or the clock went backwards) or the text
/// has no words.
pub fn words_per_minute(text: &str, started_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<f64> {
    let elapsed_ms = (now - started_at).num_milliseconds();
    if elapsed_ms <= 0 {
        return None;
    }
    let words = text.split_whitespace().count();
    if words == 0 {
        return None;
    }
    let minutes = elapsed_ms as f64 / 60_000.0;
    Some(words as f64 / minutes)
}
