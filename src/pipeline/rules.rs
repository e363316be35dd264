//! Rule-based letter classifier.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! - NHS Appointment (needs an NHS token AND an appointment-context token)
//! - Electoral Register
//! - Council Tax
//! - HMRC
//! - DVLA
//! - UKVI
//!
//! Anything else is `Unknown`. The multi-condition rules come first, and
//! the order also decides between generic keywords: a letter naming both
//! "council tax" and "hmrc" is Council Tax.

use std::sync::LazyLock;

use tracing::debug;

use super::matcher::TokenSet;
use super::normalize::normalize;
use super::types::Category;

// ── Token lists ─────────────────────────────────────────────────────

pub const NHS_IDENTITY: &[&str] = &[
    "nhs",
    "nhs scotland",
    "greater glasgow and clyde",
    "public health nhs",
];

/// "immunis" covers immunisation and immunise.
pub const NHS_APPOINTMENT_CONTEXT: &[&str] = &[
    "appointment",
    "date and time",
    "please attend",
    "clinic",
    "immunis",
    "vaccine",
    "vaccination",
    "flu vaccine",
    "chi number",
    "location:",
];

pub const ELECTORAL_REGISTER: &[&str] = &[
    "electoral registration office",
    "is the electoral register information correct for this address",
    "annual canvass",
    "household response",
    "unique security code",
    "register to vote",
    "update your household information",
    "include the names and nationalities of everyone who lives at this address",
    "elecreg.co.uk/glasgow",
    "glasgow city council",
];

pub const COUNCIL_TAX: &[&str] = &["council tax", "liability order", "arrears"];

pub const HMRC: &[&str] = &[
    "hmrc",
    "self assessment",
    "self-assessment",
    "tax return",
    "utr",
];

pub const DVLA: &[&str] = &["dvla", "v5c", "driving licence", "vehicle tax"];

pub const UKVI: &[&str] = &[
    "ukvi",
    "home office",
    "visa",
    "biometric residence",
    "brp",
];

/// The default rule table, in priority order. Each entry is a category and
/// its token groups; every group must contain at least one present token.
pub const DEFAULT_RULE_TABLE: &[(Category, &[&[&str]])] = &[
    (
        Category::NhsAppointment,
        &[NHS_IDENTITY, NHS_APPOINTMENT_CONTEXT],
    ),
    (Category::ElectoralRegister, &[ELECTORAL_REGISTER]),
    (Category::CouncilTax, &[COUNCIL_TAX]),
    (Category::Hmrc, &[HMRC]),
    (Category::Dvla, &[DVLA]),
    (Category::Ukvi, &[UKVI]),
];

static DEFAULT_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default_rules);

// ── Rules ───────────────────────────────────────────────────────────

/// A category and the token groups that select it.
///
/// The rule matches when every group has at least one token present
/// (a conjunction of disjunctions).
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: Category,
    groups: Vec<TokenSet>,
}

impl CategoryRule {
    pub fn new(category: Category, groups: &[&[&str]]) -> Self {
        Self {
            category,
            groups: groups.iter().map(|tokens| TokenSet::new(tokens)).collect(),
        }
    }

    /// Evaluate the rule against already-normalized text.
    ///
    /// A rule with no groups never matches.
    pub fn matches(&self, normalized: &str) -> bool {
        !self.groups.is_empty() && self.groups.iter().all(|g| g.matches(normalized))
    }
}

/// Ordered, first-match-wins classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
}

impl Classifier {
    /// Classifier with the built-in UK government letter rules.
    pub fn default_rules() -> Self {
        Self {
            rules: DEFAULT_RULE_TABLE
                .iter()
                .map(|(category, groups)| CategoryRule::new(*category, groups))
                .collect(),
        }
    }

    /// Classifier with no rules (everything is `Unknown`).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. It is checked after every existing rule.
    pub fn push_rule(&mut self, rule: CategoryRule) {
        self.rules.push(rule);
    }

    /// Classify a letter. The hint is prepended to the text and counts
    /// exactly like body text.
    pub fn evaluate(&self, text: &str, hint: Option<&str>) -> Category {
        let n = normalize(&format!("{} {}", hint.unwrap_or(""), text));

        for rule in &self.rules {
            if rule.matches(&n) {
                debug!(category = %rule.category, "Letter matched rule");
                return rule.category;
            }
        }

        debug!("No rule matched, falling back to Unknown");
        Category::Unknown
    }
}

impl Default for Classifier {
    /// Shares the compiled built-in rules (regexes clone cheaply).
    fn default() -> Self {
        DEFAULT_CLASSIFIER.clone()
    }
}

/// Classify with the built-in rules.
pub fn classify(text: &str, hint: Option<&str>) -> Category {
    DEFAULT_CLASSIFIER.evaluate(text, hint)
}
