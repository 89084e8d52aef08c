//! VC Diligence Pipeline
//!
//! Turns a free-text startup description and a monthly financials CSV
//! into a narrative diligence memo:
//! - Extracts a structured company profile via the MiniMax API
//! - Looks up competitor names from OpenCorporates (best-effort)
//! - Computes burn, runway, and a 20% downside scenario
//! - Generates and persists a markdown memo
//!
//! PIPELINE:
//! DESCRIPTION → PROFILE → COMPETITORS
//! CSV → METRICS
//! {PROFILE, METRICS, BENCHMARKS} → MEMO

pub mod api;
pub mod benchmarks;
pub mod competitors;
pub mod config;
pub mod error;
pub mod finance;
pub mod memo;
pub mod minimax;
pub mod models;
pub mod pipeline;
pub mod profile;

pub use error::Result;

// Re-export common types
pub use config::Config;
pub use models::*;
pub use pipeline::DiligencePipeline;
