//! Core domain types for the Statikum catalog.
//!
//! These types represent the documents, financial metrics, prepared answers,
//! and external sources that flow through the answer-resolution pipeline.
//! Everything here is loaded once at startup and never mutated.

use serde::{Deserialize, Serialize};

/// A client document in the catalog (financial statement, contract, deed…).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub doc_type: String,
    pub client: String,
    pub year: i32,
    pub short_description: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_excerpt: Option<String>,
}

/// A single financial metric value for a client and year.
///
/// `metric_name` is an open string; the year aggregation recognizes the two
/// canonical names `"trzby"` (revenue) and `"ebitda"` and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub client: String,
    pub year: i32,
    pub metric_name: String,
    pub metric_value: f64,
    pub currency: String,
}

/// Kind of external registry or data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Justice,
    Csu,
    Cadastral,
    ClientDocument,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Justice => "justice",
            SourceType::Csu => "csu",
            SourceType::Cadastral => "cadastral",
            SourceType::ClientDocument => "client_document",
        }
    }
}

/// An external source the assistant may recommend alongside an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalSource {
    pub id: String,
    pub source_type: SourceType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
}

/// Reserved [`PreparedAnswer::id`] for answers synthesized by the LLM rather
/// than retrieved from the canned catalog.
pub const AI_GENERATED_ID: &str = "ai-generated";

/// A pre-authored answer keyed by a lower-case match keyword.
///
/// `related_docs` and `related_metrics` hold catalog ids; dangling ids are
/// dropped at dereference time, never surfaced as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedAnswer {
    pub id: String,
    #[serde(rename = "match")]
    pub match_keyword: String,
    pub title: String,
    pub answer_text: String,
    pub related_client: String,
    #[serde(default)]
    pub related_docs: Vec<String>,
    #[serde(default)]
    pub related_metrics: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_external_sources: Option<Vec<String>>,
}

/// One row of the year-aggregated metrics view. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsByYear {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trzby: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebitda: Option<f64>,
}
