// src/page/mod.rs
// =============================================================================
// Parsed pages and the rules that classify them.
//
// Submodules:
// - document: wraps a scraper::Html with typed structural queries
// - classify: Index/Leaf decision, child links, continuation links
// =============================================================================

mod classify;
mod document;

pub use classify::{PageClassification, PageClassifier};
pub use document::Page;
