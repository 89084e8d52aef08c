//! Core data models for the diligence pipeline

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CustomerType {
    B2B,
    B2C,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Stage {
    #[serde(rename = "pre-seed")]
    PreSeed,
    #[serde(rename = "seed")]
    Seed,
}

impl CustomerType {
    /// Tolerant parse from model output. Anything outside the two known
    /// values normalizes to `None` rather than failing the extraction.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "B2B" => Some(CustomerType::B2B),
            "B2C" => Some(CustomerType::B2C),
            _ => None,
        }
    }
}

impl Stage {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pre-seed" | "preseed" => Some(Stage::PreSeed),
            "seed" => Some(Stage::Seed),
            _ => None,
        }
    }
}

//
// ================= Company Profile =================
//

/// Structured profile extracted from a startup description.
/// Immutable once built; `Default` is the all-empty profile used for
/// blank input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CompanyProfile {
    pub business_model: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub stage: Option<Stage>,
    pub milestone: Option<String>,
    #[serde(default)]
    pub mentioned_competitors: Vec<String>,
}

//
// ================= Financial Metrics =================
//

/// Derived burn/runway figures. Recomputed fresh on every run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialMetrics {
    /// Mean monthly expense outflow.
    pub burn: f64,
    /// Months of operation remaining at current cash and burn.
    pub runway: f64,
    /// Burn inflated by the fixed stress percentage.
    pub downside_burn: f64,
    /// Runway recomputed under the stressed burn.
    pub runway_at_downside: f64,
}

/// One CSV row of the monthly financials series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRecord {
    pub month: String,
    pub expenses: f64,
    pub cash_balance: f64,
}

//
// ================= Benchmarks =================
//

/// Named benchmark categories mapped to scalars or nested ranges.
/// Loaded verbatim from static storage and only read; the ordered map
/// keeps prompt assembly deterministic.
pub type BenchmarkSet = BTreeMap<String, serde_json::Value>;

//
// ================= Pipeline Output =================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiligenceReport {
    pub profile: CompanyProfile,
    pub competitors: Vec<String>,
    pub metrics: FinancialMetrics,
    pub memo: String,
    pub memo_path: PathBuf,
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CustomerType::B2B => "B2B",
            CustomerType::B2C => "B2C",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::PreSeed => "pre-seed",
            Stage::Seed => "seed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_type_parse() {
        assert_eq!(CustomerType::parse("B2B"), Some(CustomerType::B2B));
        assert_eq!(CustomerType::parse("b2c"), Some(CustomerType::B2C));
        assert_eq!(CustomerType::parse("enterprise"), None);
        assert_eq!(CustomerType::parse(""), None);
    }

    #[test]
    fn test_stage_parse() {
        assert_eq!(Stage::parse("pre-seed"), Some(Stage::PreSeed));
        assert_eq!(Stage::parse("Seed"), Some(Stage::Seed));
        assert_eq!(Stage::parse("series A"), None);
    }

    #[test]
    fn test_default_profile_is_empty() {
        let profile = CompanyProfile::default();
        assert!(profile.business_model.is_none());
        assert!(profile.customer_type.is_none());
        assert!(profile.stage.is_none());
        assert!(profile.milestone.is_none());
        assert!(profile.mentioned_competitors.is_empty());
    }
}
