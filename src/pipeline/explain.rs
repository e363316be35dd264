//! Static per-category explanations.
//!
//! Actions and citations never depend on the letter. Only the NHS summary
//! is enriched, with "When:" and "Location:" values read from the raw
//! (case-preserved) text rather than the normalized one.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{Category, Explanation};

/// Immutable explanation template.
#[derive(Debug)]
pub struct ExplanationTemplate {
    pub summary: &'static str,
    pub actions: &'static [&'static str],
    pub citations: &'static [&'static str],
}

impl ExplanationTemplate {
    fn to_explanation(&self, summary: String) -> Explanation {
        Explanation {
            summary,
            actions: self.actions.iter().map(|s| s.to_string()).collect(),
            citations: self.citations.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const ELECTORAL_REGISTER: ExplanationTemplate = ExplanationTemplate {
    summary: "This looks like an Electoral Register household response / annual canvass letter from your council.",
    actions: &[
        "Visit the website on the letter and enter your unique security code (Part 1 & Part 2).",
        "Confirm or update the names and nationalities of everyone aged 14+ living at the address.",
        "If nothing has changed, submit the confirmation; otherwise update and submit.",
        "If you can\u{2019}t respond online, contact your council\u{2019}s Electoral Registration Office.",
    ],
    citations: &[
        "https://www.gov.uk/register-to-vote",
        "https://www.gov.uk/electoral-register",
    ],
};

const NHS_APPOINTMENT: ExplanationTemplate = ExplanationTemplate {
    summary: "This looks like an NHS appointment invite (e.g., clinic or vaccination).",
    actions: &[
        "Add the appointment date/time to your calendar.",
        "Bring any requested documents (e.g., child Red Book).",
        "If you need to change the appointment, use the phone number or website shown.",
        "Arrive a few minutes early and follow any instructions in the letter.",
    ],
    citations: &["https://www.nhs.uk/nhs-services/appointments-and-bookings/"],
};

const COUNCIL_TAX: ExplanationTemplate = ExplanationTemplate {
    summary: "This appears to be a Council Tax notice.",
    actions: &[
        "Read the bill/notice carefully and note any payment dates.",
        "Follow the contact or payment steps if action is required.",
        "Keep a record of any reference numbers.",
    ],
    citations: &["https://www.gov.uk/council-tax"],
};

const HMRC: ExplanationTemplate = ExplanationTemplate {
    summary: "This appears to be an HMRC Self Assessment letter.",
    actions: &[
        "Check whether you need to file a return or make a payment.",
        "Follow any steps listed and keep copies.",
        "Act by the date shown if one is provided.",
    ],
    citations: &["https://www.gov.uk/self-assessment-tax-returns"],
};

/// Used for DVLA, UKVI and Unknown.
const GENERIC: ExplanationTemplate = ExplanationTemplate {
    summary: "This appears to be a government letter. Review the guidance and respond if required.",
    actions: &[
        "Read the official guidance.",
        "Follow steps if applicable.",
        "Respond by any deadline.",
    ],
    citations: &["https://www.gov.uk/"],
};

/// A label opening a line or a sentence. Preferred, so that wording such
/// as "Appointment-only" inside another field's value is not taken as a label.
static LOCATION_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)(?:^\s*|[.;]\s+)(?P<label>Location)\s*[:\-]\s*(?P<value>[^\n\r]+)").unwrap()
});

static WHEN_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)(?:^\s*|[.;]\s+)(?P<label>Date\s*(?:and time)?|Appointment)\s*[:\-]\s*(?P<value>[^\n\r]+)",
    )
    .unwrap()
});

/// Label anywhere in the text, used when no line or sentence opens with one.
static LOCATION_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<label>Location)\s*[:\-]\s*(?P<value>[^\n\r]+)").unwrap()
});

static WHEN_ANYWHERE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?P<label>Date\s*(?:and time)?|Appointment)\s*[:\-]\s*(?P<value>[^\n\r]+)")
        .unwrap()
});

/// Template for a category.
pub fn template_for(category: Category) -> &'static ExplanationTemplate {
    match category {
        Category::ElectoralRegister => &ELECTORAL_REGISTER,
        Category::NhsAppointment => &NHS_APPOINTMENT,
        Category::CouncilTax => &COUNCIL_TAX,
        Category::Hmrc => &HMRC,
        Category::Dvla | Category::Ukvi | Category::Unknown => &GENERIC,
    }
}

/// Byte positions of one labelled field in the raw text.
#[derive(Debug, Clone)]
struct LabelledField {
    label_start: usize,
    value: Range<usize>,
}

fn find_field(raw: &str, labelled: &Regex, anywhere: &Regex) -> Option<LabelledField> {
    let caps = labelled.captures(raw).or_else(|| anywhere.captures(raw))?;
    let label = caps.name("label")?;
    let value = caps.name("value")?;
    Some(LabelledField {
        label_start: label.start(),
        value: value.range(),
    })
}

/// Text of `field`, cut where `other` begins when both share a line (OCR
/// often puts the whole letter on one line). Trailing punctuation is
/// dropped; a blank value is `None`.
fn field_text(raw: &str, field: &LabelledField, other: Option<&LabelledField>) -> Option<String> {
    let end = other
        .map(|o| o.label_start)
        .filter(|start| field.value.contains(start) && *start > field.value.start)
        .unwrap_or(field.value.end);
    let cleaned = raw[field.value.start..end]
        .trim()
        .trim_end_matches(['.', ',', ';', ' ']);
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn nhs_summary(raw: &str) -> String {
    let when = find_field(raw, &WHEN_LABELLED, &WHEN_ANYWHERE);
    let location = find_field(raw, &LOCATION_LABELLED, &LOCATION_ANYWHERE);

    let mut summary = NHS_APPOINTMENT.summary.to_string();
    if let Some(text) = when.as_ref().and_then(|w| field_text(raw, w, location.as_ref())) {
        summary.push_str(&format!(" When: {text}."));
    }
    if let Some(text) = location.as_ref().and_then(|l| field_text(raw, l, when.as_ref())) {
        summary.push_str(&format!(" Location: {text}."));
    }
    summary
}

/// Build the explanation for a classified letter.
pub fn explain(category: Category, raw_text: &str) -> Explanation {
    let template = template_for(category);
    let summary = match category {
        Category::NhsAppointment => nhs_summary(raw_text),
        _ => template.summary.to_string(),
    };
    template.to_explanation(summary)
}
