//! Deadline / appointment date extraction.
//!
//! Works on normalized text. Order of attempts:
//! 1. NHS appointments: an explicit "date (and time):" or "appointment:" label
//! 2. The tail of a line anchored on respond / reply / return / deadline,
//!    searched for a numeric date, then a textual date
//! 3. The whole text, numeric date first, then textual date
//!
//! Letters without a usable date yield `None`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::normalize::normalize;
use super::types::Category;

/// Month names, full and abbreviated. "Sept" sits before "Sep" so the
/// longer spelling is preferred.
const MONTHS: &str = "(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)";

/// `D Month YYYY`, e.g. "10 june 2025" or "3 Sept 2024".
static TEXTUAL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b([0-3]?\d)\s+{MONTHS}\s+([12]\d{{3}})\b")).unwrap()
});

/// `D/M/YYYY` or `D-M-YYYY` with one or two digit day and month.
static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-3]?\d)[/\-]([01]?\d)[/\-]([12]\d{3})\b").unwrap());

/// "date:" / "date and time:" label; the value runs to the next comma or
/// line break, keeping a trailing ", HH:MM" time.
static NHS_DATE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdate\s*(and time)?\s*[:\-]\s*([^\n\r,]+(?:,\s*\d{1,2}:\d{2})?)").unwrap()
});

static NHS_APPOINTMENT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bappointment\s*[:\-]\s*([^\n\r,]+)").unwrap());

/// Anchor phrase plus the rest of its line.
static DEADLINE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(respond|reply|return|deadline)\s*(by|:)?\s*([^\n\r]*)").unwrap()
});

/// First date in `text`: numeric if present, otherwise textual.
fn find_date(text: &str) -> Option<String> {
    NUMERIC_DATE
        .find(text)
        .or_else(|| TEXTUAL_DATE.find(text))
        .map(|m| m.as_str().to_string())
}

/// Value of an explicit NHS date or appointment label.
fn find_nhs_label(n: &str) -> Option<String> {
    let from_date = NHS_DATE_LABEL
        .captures(n)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().trim().to_string());
    if from_date.is_some() {
        return from_date;
    }

    NHS_APPOINTMENT_LABEL
        .captures(n)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the most relevant deadline or appointment date from a letter.
pub fn extract_deadline(text: &str, category: Category) -> Option<String> {
    let n = normalize(text);

    if category == Category::NhsAppointment {
        if let Some(found) = find_nhs_label(&n) {
            debug!("Deadline taken from NHS appointment label");
            return Some(found);
        }
    }

    if let Some(caps) = DEADLINE_ANCHOR.captures(&n) {
        let tail = caps.get(3).map_or("", |m| m.as_str());
        if let Some(found) = find_date(tail) {
            debug!(anchor = %&caps[1], "Deadline found after anchor phrase");
            return Some(found);
        }
        // TODO: decide whether an anchored line without a date should stop
        // the search instead of falling back to any date in the letter.
        debug!(anchor = %&caps[1], "Anchor phrase had no date, scanning whole text");
    }

    find_date(&n)
}
