//! # Statikum Assistant
//!
//! A demo question-answering service over a fixed catalog of financial and
//! legal documents for a single organization ("Statikum").
//!
//! A free-text question is resolved along one of two paths:
//!
//! - **LLM path** — the question is forwarded to an OpenAI-style
//!   chat-completions endpoint together with the full external-source
//!   catalog; the model answers under a strict structured-output contract
//!   and recommends external sources by id.
//! - **Canned path** — the question is matched against hand-authored
//!   prepared answers by case-insensitive substring keyword, entirely
//!   offline, with related documents and year-aggregated metrics resolved
//!   from the catalog.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌───────────────┐    ┌─────────────┐
//! │ Catalog  │───▶│ Matcher /      │    │ LLM answer  │──▶ chat completions
//! │ (JSON)   │    │ relation       │    │ service     │    (OpenAI-style)
//! └──────────┘    │ resolver       │    └──────┬──────┘
//!                 └──────┬────────┘           │
//!                        ▼                    ▼
//!                  ┌──────────┐        ┌──────────┐
//!                  │   CLI    │        │   HTTP   │
//!                  │(statikum)│        │  (axum)  │
//!                  └──────────┘        └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core domain types |
//! | [`catalog`] | Immutable catalog store |
//! | [`matcher`] | Canned-answer matching and relation resolution |
//! | [`llm`] | LLM answer service with structured-output contract |
//! | [`ask`] | CLI question entry points |
//! | [`sources`] | External-source listing |
//! | [`server`] | HTTP API server |

pub mod ask;
pub mod catalog;
pub mod config;
pub mod llm;
pub mod matcher;
pub mod models;
pub mod server;
pub mod sources;
