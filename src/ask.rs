//! CLI entry points for asking questions.
//!
//! Two modes, mirroring the two resolution paths:
//!
//! - [`run_ask`] sends the question to the LLM answer service and prints the
//!   answer plus the recommended external sources resolved against the
//!   catalog.
//! - [`run_ask_local`] stays entirely offline: it matches the question
//!   against the prepared-answer catalog and prints the canned answer with
//!   its related documents and year-aggregated metrics.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::llm;
use crate::matcher::{
    find_prepared_answer, format_currency, group_metrics_by_year, related_documents,
    related_metrics,
};

/// Ask through the LLM answer service and print the result to stdout.
pub async fn run_ask(config: &Config, catalog: &Catalog, question: &str) -> Result<()> {
    let resolved = llm::resolve_question(&config.llm, catalog, question).await?;
    let answer = resolved.into_prepared_answer(question);

    println!("--- {} ---", answer.title);
    println!("{}", answer.answer_text);
    println!();

    let recommended = answer.related_external_sources.unwrap_or_default();
    if recommended.is_empty() {
        println!("Žádné doporučené externí zdroje.");
        return Ok(());
    }

    println!("--- Doporučené zdroje ({}) ---", recommended.len());
    for id in &recommended {
        // Ids are already filtered against the catalog by the service.
        if let Some(source) = catalog.external_source(id) {
            println!(
                "{:<20} {:<16} {}",
                source.id,
                source.source_type.as_str(),
                source.name
            );
            if let Some(ref url) = source.url {
                println!("{:<20} {}", "", url);
            }
        }
    }

    Ok(())
}

/// Match the question against the prepared-answer catalog and print the
/// canned answer, without any network call.
pub fn run_ask_local(catalog: &Catalog, question: &str) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("question must not be empty");
    }

    let answer = match find_prepared_answer(question, &catalog.answers) {
        Some(answer) => answer,
        None => {
            println!("Pro tento dotaz zatím nemáme připravený scénář.");
            return Ok(());
        }
    };

    println!("--- {} ---", answer.title);
    println!("{}", answer.answer_text);
    println!();

    let docs = related_documents(&answer.related_docs, &catalog.documents);
    if !docs.is_empty() {
        println!("--- Související dokumenty ({}) ---", docs.len());
        for doc in &docs {
            println!("{:<28} {:<12} {}  {}", doc.name, doc.doc_type, doc.year, doc.link);
        }
        println!();
    }

    let metrics = related_metrics(&answer.related_metrics, &catalog.metrics);
    let by_year = group_metrics_by_year(&metrics);
    if !by_year.is_empty() {
        println!("--- Finanční metriky ---");
        println!("{:<8} {:<16} {:<16}", "ROK", "TRŽBY", "EBITDA");
        for row in &by_year {
            println!(
                "{:<8} {:<16} {:<16}",
                row.year,
                row.trzby.map(format_currency).unwrap_or_else(|| "-".to_string()),
                row.ebitda.map(format_currency).unwrap_or_else(|| "-".to_string()),
            );
        }
        println!();
    }

    // Statically authored source references, when the scenario carries them.
    if let Some(ids) = &answer.related_external_sources {
        let sources: Vec<_> = ids
            .iter()
            .filter_map(|id| catalog.external_source(id))
            .collect();
        if !sources.is_empty() {
            println!("--- Externí zdroje ({}) ---", sources.len());
            for source in sources {
                println!(
                    "{:<20} {:<16} {}",
                    source.id,
                    source.source_type.as_str(),
                    source.name
                );
            }
        }
    }

    Ok(())
}
