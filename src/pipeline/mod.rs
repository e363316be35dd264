//! Letter classification pipeline.
//!
//! Every letter's OCR text flows through:
//! 1. `rules::Classifier::evaluate()`: ordered token rules, first match wins
//! 2. `deadline::extract_deadline()`: labelled or generic date search
//! 3. `explain::explain()`: static template for the category
//!
//! No stage performs I/O or keeps state between letters.

pub mod deadline;
pub mod explain;
pub mod matcher;
pub mod normalize;
pub mod processor;
pub mod rules;
pub mod types;

pub use processor::{LetterProcessor, process};
pub use types::{Category, ClassificationRequest, ClassificationResult};
