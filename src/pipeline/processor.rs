//! Letter processor: classify, then extract a deadline, then explain.
//!
//! Pure and synchronous. Every input produces a result; the worst case is
//! `Unknown` with the generic explanation and no deadline.

use crate::pipeline::deadline::extract_deadline;
use crate::pipeline::explain::explain;
use crate::pipeline::rules::{Classifier, classify};
use crate::pipeline::types::{Category, ClassificationRequest, ClassificationResult};

/// Runs the three pipeline stages over one letter.
#[derive(Debug, Clone, Default)]
pub struct LetterProcessor {
    classifier: Classifier,
}

impl LetterProcessor {
    /// Create a processor with a custom classifier.
    pub fn new(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// Process one letter's OCR text and optional hint.
    pub fn process(&self, text: &str, hint: Option<&str>) -> ClassificationResult {
        complete(self.classifier.evaluate(text, hint), text)
    }

    pub fn process_request(&self, request: &ClassificationRequest) -> ClassificationResult {
        self.process(&request.text, request.hint.as_deref())
    }
}

/// Deadline and explanation stages for an already classified letter.
fn complete(category: Category, text: &str) -> ClassificationResult {
    let deadline = extract_deadline(text, category);
    let explanation = explain(category, text);

    ClassificationResult {
        category,
        deadline,
        summary: explanation.summary,
        actions: explanation.actions,
        citations: explanation.citations,
    }
}

/// Process a letter with the built-in rules.
pub fn process(text: &str, hint: Option<&str>) -> ClassificationResult {
    complete(classify(text, hint), text)
}
