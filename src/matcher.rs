//! Canned-answer matching and relation resolution.
//!
//! Pure, synchronous helpers over the loaded catalog: substring matching of
//! a question against prepared answers, dereferencing of related document and
//! metric ids, aggregation of metrics into per-year rows, and currency
//! formatting for display.

use std::collections::BTreeMap;

use crate::models::{Document, Metric, MetricsByYear, PreparedAnswer};

/// Canonical metric name for revenue rows.
pub const METRIC_TRZBY: &str = "trzby";
/// Canonical metric name for EBITDA rows.
pub const METRIC_EBITDA: &str = "ebitda";

/// Find the first prepared answer whose match keyword is a substring of the
/// lower-cased question.
///
/// Matching is case-insensitive, with no diacritic folding, tokenization, or
/// fuzzy matching; the first answer in catalog order wins. Returns `None`
/// when no keyword matches — callers must treat that distinctly from a
/// matched answer with empty text.
pub fn find_prepared_answer<'a>(
    question: &str,
    answers: &'a [PreparedAnswer],
) -> Option<&'a PreparedAnswer> {
    let question = question.to_lowercase();
    answers
        .iter()
        .find(|answer| question.contains(&answer.match_keyword.to_lowercase()))
}

/// Dereference document ids against the catalog, preserving the order of the
/// id list. Ids with no match are dropped, never null-padded.
pub fn related_documents(ids: &[String], all_documents: &[Document]) -> Vec<Document> {
    ids.iter()
        .filter_map(|id| all_documents.iter().find(|doc| &doc.id == id).cloned())
        .collect()
}

/// Dereference metric ids against the catalog, preserving id-list order and
/// dropping misses.
pub fn related_metrics(ids: &[String], all_metrics: &[Metric]) -> Vec<Metric> {
    ids.iter()
        .filter_map(|id| all_metrics.iter().find(|metric| &metric.id == id).cloned())
        .collect()
}

/// Fold metrics into one row per year, ascending.
///
/// A metric named `"trzby"` sets the year's revenue field, `"ebitda"` the
/// EBITDA field; any other name leaves the row untouched. When several
/// metrics share a year and canonical name, the later one in iteration order
/// overwrites the earlier (last write wins).
pub fn group_metrics_by_year(metrics: &[Metric]) -> Vec<MetricsByYear> {
    let mut by_year: BTreeMap<i32, MetricsByYear> = BTreeMap::new();

    for metric in metrics {
        let row = by_year.entry(metric.year).or_insert(MetricsByYear {
            year: metric.year,
            trzby: None,
            ebitda: None,
        });

        match metric.metric_name.as_str() {
            METRIC_TRZBY => row.trzby = Some(metric.metric_value),
            METRIC_EBITDA => row.ebitda = Some(metric.metric_value),
            _ => {}
        }
    }

    by_year.into_values().collect()
}

/// Render a CZK amount in millions with one decimal place. Ties round away
/// from zero, so 1 250 000 renders as `"1.3 mil. Kč"`.
pub fn format_currency(value: f64) -> String {
    let millions = (value / 1_000_000.0 * 10.0).round() / 10.0;
    format!("{:.1} mil. Kč", millions)
}
