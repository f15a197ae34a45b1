//! Immutable catalog store.
//!
//! Loads the four catalog collections (documents, metrics, prepared answers,
//! external sources) from JSON files once at startup. The loaded [`Catalog`]
//! is read-only for the lifetime of the process and is shared across request
//! handlers via `Arc` — there is no write path and no cache invalidation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::models::{Document, ExternalSource, Metric, PreparedAnswer};

/// The full static catalog, loaded once per process start.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub documents: Vec<Document>,
    pub metrics: Vec<Metric>,
    pub answers: Vec<PreparedAnswer>,
    pub external_sources: Vec<ExternalSource>,
}

/// Wire shape of the catalog dump returned by `GET /api/catalog`.
///
/// Field names match the original client contract (`externalSources`).
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub documents: &'a [Document],
    pub metrics: &'a [Metric],
    pub answers: &'a [PreparedAnswer],
    #[serde(rename = "externalSources")]
    pub external_sources: &'a [ExternalSource],
}

impl Catalog {
    /// Load the catalog from the directory configured in `[catalog].dir`.
    pub fn load(config: &Config) -> Result<Self> {
        Self::load_dir(&config.catalog.dir)
    }

    /// Load the catalog from a directory holding the four JSON files.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            documents: load_collection(dir, "documents.json")?,
            metrics: load_collection(dir, "metrics.json")?,
            answers: load_collection(dir, "answers.json")?,
            external_sources: load_collection(dir, "external_sources.json")?,
        })
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    pub fn external_source(&self, id: &str) -> Option<&ExternalSource> {
        self.external_sources.iter().find(|s| s.id == id)
    }

    pub fn has_external_source(&self, id: &str) -> bool {
        self.external_source(id).is_some()
    }

    pub fn snapshot(&self) -> CatalogSnapshot<'_> {
        CatalogSnapshot {
            documents: &self.documents,
            metrics: &self.metrics,
            answers: &self.answers,
            external_sources: &self.external_sources,
        }
    }
}

fn load_collection<T: serde::de::DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}
