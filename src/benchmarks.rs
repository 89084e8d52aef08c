//! Benchmark reference data
//!
//! Static category-to-range mapping read once per run and treated as
//! opaque data downstream.

use crate::error::DiligenceError;
use crate::models::BenchmarkSet;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Load the benchmark set from a JSON file. A missing file is a distinct
/// not-found error so callers can tell it apart from bad data.
pub fn load_benchmarks<P: AsRef<Path>>(path: P) -> Result<BenchmarkSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DiligenceError::NotFound(format!(
            "Benchmarks file not found: {}",
            path.display()
        )));
    }

    let raw = std::fs::read_to_string(path)?;
    let benchmarks = parse_benchmarks(&raw)?;

    info!(
        categories = benchmarks.len(),
        path = %path.display(),
        "Loaded benchmarks"
    );
    Ok(benchmarks)
}

fn parse_benchmarks(raw: &str) -> Result<BenchmarkSet> {
    serde_json::from_str(raw).map_err(|e| {
        DiligenceError::InvalidInput(format!("benchmarks file is not a JSON object: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_and_nested_categories() {
        let raw = r#"{
            "monthly_burn_usd": {"pre-seed": [15000, 60000], "seed": [50000, 200000]},
            "target_runway_months": 18
        }"#;
        let benchmarks = parse_benchmarks(raw).unwrap();
        assert_eq!(benchmarks.len(), 2);
        assert!(benchmarks["monthly_burn_usd"].is_object());
        assert_eq!(benchmarks["target_runway_months"], 18);
    }

    #[test]
    fn test_parse_rejects_non_object_json() {
        assert!(matches!(
            parse_benchmarks("[1, 2]").unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
        assert!(matches!(
            parse_benchmarks("not json").unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_benchmarks("no-such-benchmarks.json").unwrap_err();
        assert!(matches!(err, DiligenceError::NotFound(_)));
    }
}
