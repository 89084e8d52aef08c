//! Diligence memo generation
//!
//! Prompt assembly is deterministic string formatting; the section
//! layout and the four analysis directives are the contract here, since
//! the model's own prose cannot be asserted.

use crate::minimax::ChatModel;
use crate::models::{BenchmarkSet, CompanyProfile, FinancialMetrics};
use crate::Result;
use std::path::Path;
use tracing::info;

pub const SYSTEM_PROMPT: &str = "You are an expert VC analyst. Generate a concise financial diligence memo \
analyzing whether this startup's financials align with their stage and business model. \
Be specific and data-driven.";

/// Build the user prompt from the profile, metrics, and benchmark data.
/// Byte-exact output; covered by tests.
pub fn build_user_prompt(
    profile: &CompanyProfile,
    metrics: &FinancialMetrics,
    benchmarks: &BenchmarkSet,
) -> String {
    let mut lines: Vec<String> = vec![
        "## Company profile".to_string(),
        format!(
            "- Business model: {}",
            profile.business_model.as_deref().unwrap_or("None")
        ),
        format!(
            "- Customer type: {}",
            profile
                .customer_type
                .map(|c| c.to_string())
                .unwrap_or_else(|| "None".to_string())
        ),
        format!(
            "- Stage: {}",
            profile
                .stage
                .map(|s| s.to_string())
                .unwrap_or_else(|| "None".to_string())
        ),
        format!(
            "- Milestone: {}",
            profile.milestone.as_deref().unwrap_or("None")
        ),
        format!(
            "- Mentioned competitors: {}",
            if profile.mentioned_competitors.is_empty() {
                "None".to_string()
            } else {
                format!("{:?}", profile.mentioned_competitors)
            }
        ),
        String::new(),
        "## Financial metrics".to_string(),
        format!("- Monthly burn: {}", metrics.burn),
        format!("- Runway (months): {}", metrics.runway),
        format!("- Downside scenario burn: {}", metrics.downside_burn),
        format!(
            "- Runway at downside (months): {}",
            metrics.runway_at_downside
        ),
        String::new(),
        "## Relevant benchmark ranges".to_string(),
    ];

    for (category, values) in benchmarks {
        lines.push(format!("- **{}**: {}", category, values));
    }

    lines.extend([
        String::new(),
        "---".to_string(),
        "Please analyze and cover:".to_string(),
        "1. **Burn assessment** – How does current burn compare to benchmarks for this stage/model?"
            .to_string(),
        "2. **Runway adequacy** – Is runway sufficient relative to targets and milestones?"
            .to_string(),
        "3. **Capital efficiency** – Efficiency vs. peers (burn per employee / benchmarks if relevant)."
            .to_string(),
        "4. **Milestone alignment** – Can they reach the stated milestone with current runway?"
            .to_string(),
        String::new(),
        "Return the memo in markdown format.".to_string(),
    ]);

    lines.join("\n")
}

/// Ask the model for the memo and persist it, overwriting any prior one.
pub async fn generate_memo(
    model: &dyn ChatModel,
    profile: &CompanyProfile,
    metrics: &FinancialMetrics,
    benchmarks: &BenchmarkSet,
    memo_path: &Path,
) -> Result<String> {
    let user_prompt = build_user_prompt(profile, metrics, benchmarks);

    let memo = model.complete(SYSTEM_PROMPT, &user_prompt).await?;

    tokio::fs::write(memo_path, &memo).await?;
    info!(path = %memo_path.display(), "Memo written");

    Ok(memo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerType, Stage};
    use async_trait::async_trait;
    use serde_json::json;

    fn sample_metrics() -> FinancialMetrics {
        FinancialMetrics {
            burn: 1000.0,
            runway: 10.0,
            downside_burn: 1200.0,
            runway_at_downside: 8.5,
        }
    }

    fn sample_benchmarks() -> BenchmarkSet {
        let mut benchmarks = BenchmarkSet::new();
        benchmarks.insert(
            "monthly_burn_usd".to_string(),
            json!({"seed": [50000, 200000]}),
        );
        benchmarks.insert("target_runway_months".to_string(), json!(18));
        benchmarks
    }

    #[test]
    fn test_prompt_shape_with_full_profile() {
        let profile = CompanyProfile {
            business_model: Some("SaaS".to_string()),
            customer_type: Some(CustomerType::B2B),
            stage: Some(Stage::Seed),
            milestone: Some("Reach $1M ARR".to_string()),
            mentioned_competitors: vec!["Acme".to_string(), "Globex".to_string()],
        };

        let prompt = build_user_prompt(&profile, &sample_metrics(), &sample_benchmarks());

        let expected = "\
## Company profile
- Business model: SaaS
- Customer type: B2B
- Stage: seed
- Milestone: Reach $1M ARR
- Mentioned competitors: [\"Acme\", \"Globex\"]

## Financial metrics
- Monthly burn: 1000
- Runway (months): 10
- Downside scenario burn: 1200
- Runway at downside (months): 8.5

## Relevant benchmark ranges
- **monthly_burn_usd**: {\"seed\":[50000,200000]}
- **target_runway_months**: 18

---
Please analyze and cover:
1. **Burn assessment** – How does current burn compare to benchmarks for this stage/model?
2. **Runway adequacy** – Is runway sufficient relative to targets and milestones?
3. **Capital efficiency** – Efficiency vs. peers (burn per employee / benchmarks if relevant).
4. **Milestone alignment** – Can they reach the stated milestone with current runway?

Return the memo in markdown format.";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_prompt_placeholders_for_empty_profile() {
        let prompt = build_user_prompt(
            &CompanyProfile::default(),
            &sample_metrics(),
            &BenchmarkSet::new(),
        );

        assert!(prompt.contains("- Business model: None"));
        assert!(prompt.contains("- Customer type: None"));
        assert!(prompt.contains("- Stage: None"));
        assert!(prompt.contains("- Milestone: None"));
        assert!(prompt.contains("- Mentioned competitors: None"));
    }

    struct CannedModel(String);

    #[async_trait]
    impl ChatModel for CannedModel {
        async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_generate_memo_persists_model_output() {
        let model = CannedModel("# Memo\n\nLooks fundable.".to_string());
        let memo_path = std::env::temp_dir().join("vc-diligence-memo-test.md");

        let memo = generate_memo(
            &model,
            &CompanyProfile::default(),
            &sample_metrics(),
            &BenchmarkSet::new(),
            &memo_path,
        )
        .await
        .unwrap();

        assert_eq!(memo, "# Memo\n\nLooks fundable.");
        let on_disk = std::fs::read_to_string(&memo_path).unwrap();
        assert_eq!(on_disk, memo);
        std::fs::remove_file(&memo_path).ok();
    }
}
