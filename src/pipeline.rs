//! Diligence pipeline orchestrator
//!
//! Sequences the four stages behind both surfaces:
//! PROFILE → COMPETITORS → FINANCIALS → MEMO
//!
//! Each run is independent and stateless apart from overwriting the memo
//! file. Competitor lookup is the only best-effort stage; everything
//! else bubbles its category-labeled error to the caller.

use crate::benchmarks::load_benchmarks;
use crate::competitors::RegistryClient;
use crate::config::Config;
use crate::finance::analyze_records;
use crate::memo::generate_memo;
use crate::minimax::{ChatModel, MiniMaxClient};
use crate::models::{DiligenceReport, MonthlyRecord};
use crate::profile::extract_company_profile;
use crate::Result;
use std::sync::Arc;
use tracing::info;

pub struct DiligencePipeline {
    model: Arc<dyn ChatModel>,
    registry: RegistryClient,
    config: Config,
}

impl DiligencePipeline {
    pub fn new(model: Arc<dyn ChatModel>, config: Config) -> Self {
        Self {
            model,
            registry: RegistryClient::new(),
            config,
        }
    }

    /// Wire up the live MiniMax client from configuration.
    pub fn from_config(config: Config) -> Self {
        let model = Arc::new(MiniMaxClient::new(&config));
        Self::new(model, config)
    }

    /// Run the full pipeline over a startup description and the parsed
    /// monthly financials series.
    pub async fn run(
        &self,
        description: &str,
        records: &[MonthlyRecord],
    ) -> Result<DiligenceReport> {
        info!("Extracting company profile");
        let profile = extract_company_profile(self.model.as_ref(), description).await?;

        let competitors = match profile.business_model.as_deref().map(str::trim) {
            Some(keywords) if !keywords.is_empty() => {
                info!(keywords, "Searching for competitors");
                self.registry.find_competitors(keywords).await
            }
            _ => {
                info!("Skipping competitor search (no business model)");
                Vec::new()
            }
        };

        info!("Loading benchmarks");
        let benchmarks = load_benchmarks(&self.config.benchmarks_path)?;

        info!("Analyzing financials");
        let metrics = analyze_records(records)?;

        info!("Generating diligence memo");
        let memo = generate_memo(
            self.model.as_ref(),
            &profile,
            &metrics,
            &benchmarks,
            &self.config.memo_path,
        )
        .await?;

        Ok(DiligenceReport {
            profile,
            competitors,
            metrics,
            memo,
            memo_path: self.config.memo_path.clone(),
        })
    }
}
