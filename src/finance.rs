//! Financial metrics calculator
//!
//! Pure burn/runway arithmetic over the monthly financials series, plus
//! CSV ingestion. Row order in the source file defines recency: the last
//! row's cash balance is taken as the current cash position.

use crate::error::DiligenceError;
use crate::models::{FinancialMetrics, MonthlyRecord};
use crate::Result;
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Fixed stress increase applied to burn in the downside scenario.
pub const DOWNSIDE_INCREASE_PERCENT: f64 = 20.0;

const REQUIRED_COLUMNS: [&str; 3] = ["month", "expenses", "cash_balance"];

/// Mean monthly burn across the full expense series.
pub fn calculate_burn(records: &[MonthlyRecord]) -> Result<f64> {
    if records.is_empty() {
        return Err(DiligenceError::InvalidInput(
            "financial records are empty".to_string(),
        ));
    }
    let total: f64 = records.iter().map(|r| r.expenses).sum();
    Ok(total / records.len() as f64)
}

/// Months of runway remaining at the given cash and burn.
///
/// Zero burn collapses to zero runway rather than infinity; callers can
/// rely on the result always being a finite non-negative number.
pub fn calculate_runway(cash_balance: f64, monthly_burn: f64) -> Result<f64> {
    if cash_balance < 0.0 {
        return Err(DiligenceError::InvalidInput(
            "cash_balance must be non-negative".to_string(),
        ));
    }
    if monthly_burn < 0.0 {
        return Err(DiligenceError::InvalidInput(
            "monthly_burn must be non-negative".to_string(),
        ));
    }
    if monthly_burn == 0.0 {
        return Ok(0.0);
    }
    Ok(cash_balance / monthly_burn)
}

/// Burn with a percentage stress increase applied.
pub fn simulate_downside(monthly_burn: f64, increase_percent: f64) -> Result<f64> {
    if monthly_burn < 0.0 {
        return Err(DiligenceError::InvalidInput(
            "monthly_burn must be non-negative".to_string(),
        ));
    }
    if increase_percent < 0.0 {
        return Err(DiligenceError::InvalidInput(
            "increase_percent must be non-negative".to_string(),
        ));
    }
    Ok(monthly_burn * (1.0 + increase_percent / 100.0))
}

/// Compute the full metrics set from an in-memory record series.
///
/// Cash is taken from the last row by input order; no date sorting is
/// performed on the month column.
pub fn analyze_records(records: &[MonthlyRecord]) -> Result<FinancialMetrics> {
    let burn = calculate_burn(records)?;
    let cash_balance = records
        .last()
        .map(|r| r.cash_balance)
        .unwrap_or_default();
    let runway = calculate_runway(cash_balance, burn)?;
    let downside_burn = simulate_downside(burn, DOWNSIDE_INCREASE_PERCENT)?;
    let runway_at_downside = calculate_runway(cash_balance, downside_burn)?;

    Ok(FinancialMetrics {
        burn,
        runway,
        downside_burn,
        runway_at_downside,
    })
}

/// Parse monthly records from any CSV source (file or uploaded body).
///
/// Requires the `month`, `expenses`, and `cash_balance` columns; the
/// error message names whichever are missing.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<MonthlyRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DiligenceError::InvalidInput(format!("failed to read CSV header: {}", e)))?
        .clone();

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(DiligenceError::InvalidInput("CSV is empty".to_string()));
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(DiligenceError::InvalidInput(format!(
            "CSV missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<MonthlyRecord>().enumerate() {
        let record = row.map_err(|e| {
            DiligenceError::InvalidInput(format!("invalid CSV row {}: {}", index + 2, e))
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(DiligenceError::InvalidInput(
            "CSV contains no data".to_string(),
        ));
    }

    Ok(records)
}

/// Read a CSV file and compute burn, runway, and downside metrics.
pub fn analyze_csv<P: AsRef<Path>>(path: P) -> Result<FinancialMetrics> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DiligenceError::NotFound(format!(
            "CSV file not found: {}",
            path.display()
        )));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| DiligenceError::InvalidInput(format!("failed to read CSV: {}", e)))?;
    let records = read_records(file)?;

    info!(
        rows = records.len(),
        path = %path.display(),
        "Analyzing financials"
    );

    analyze_records(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: &str, expenses: f64, cash_balance: f64) -> MonthlyRecord {
        MonthlyRecord {
            month: month.to_string(),
            expenses,
            cash_balance,
        }
    }

    #[test]
    fn test_burn_is_mean_of_expenses() {
        let records = vec![
            record("2025-01", 1000.0, 50000.0),
            record("2025-02", 2000.0, 48000.0),
            record("2025-03", 3000.0, 45000.0),
        ];
        assert_eq!(calculate_burn(&records).unwrap(), 2000.0);
    }

    #[test]
    fn test_burn_fails_on_empty_records() {
        let err = calculate_burn(&[]).unwrap_err();
        assert!(matches!(err, DiligenceError::InvalidInput(_)));
    }

    #[test]
    fn test_runway_is_cash_over_burn() {
        assert_eq!(calculate_runway(10000.0, 1000.0).unwrap(), 10.0);
        assert!((calculate_runway(10000.0, 1200.0).unwrap() - 8.333333333333334).abs() < 1e-9);
    }

    #[test]
    fn test_zero_burn_collapses_runway_to_zero() {
        assert_eq!(calculate_runway(0.0, 0.0).unwrap(), 0.0);
        assert_eq!(calculate_runway(500000.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_runway_rejects_negative_arguments() {
        assert!(matches!(
            calculate_runway(-1.0, 100.0).unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
        assert!(matches!(
            calculate_runway(100.0, -1.0).unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_downside_applies_percentage_increase() {
        assert_eq!(simulate_downside(10000.0, 20.0).unwrap(), 12000.0);
        assert_eq!(simulate_downside(10000.0, 0.0).unwrap(), 10000.0);
    }

    #[test]
    fn test_downside_rejects_negative_arguments() {
        assert!(matches!(
            simulate_downside(-1.0, 20.0).unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
        assert!(matches!(
            simulate_downside(1.0, -20.0).unwrap_err(),
            DiligenceError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_analyze_uses_last_row_cash() {
        let records = vec![
            record("2025-01", 1000.0, 12000.0),
            record("2025-02", 1000.0, 11000.0),
            record("2025-03", 1000.0, 10000.0),
        ];
        let metrics = analyze_records(&records).unwrap();
        assert_eq!(metrics.burn, 1000.0);
        assert_eq!(metrics.runway, 10.0);
        assert_eq!(metrics.downside_burn, 1200.0);
        assert!((metrics.runway_at_downside - 10000.0 / 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_read_records_parses_ordered_rows() {
        let csv = "month,expenses,cash_balance\n2025-01,1000,12000\n2025-02,1100,10900\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].month, "2025-01");
        assert_eq!(records[1].cash_balance, 10900.0);
    }

    #[test]
    fn test_read_records_names_missing_columns() {
        let csv = "month,expenses\n2025-01,1000\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        match err {
            DiligenceError::InvalidInput(msg) => assert!(msg.contains("cash_balance")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_read_records_rejects_empty_input() {
        let err = read_records("".as_bytes()).unwrap_err();
        assert!(matches!(err, DiligenceError::InvalidInput(_)));

        let err = read_records("month,expenses,cash_balance\n".as_bytes()).unwrap_err();
        match err {
            DiligenceError::InvalidInput(msg) => assert!(msg.contains("no data")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_read_records_rejects_non_numeric_values() {
        let csv = "month,expenses,cash_balance\n2025-01,lots,12000\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DiligenceError::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_csv_missing_file_is_not_found() {
        let err = analyze_csv("definitely-not-here.csv").unwrap_err();
        assert!(matches!(err, DiligenceError::NotFound(_)));
    }

    #[test]
    fn test_analyze_csv_unreadable_path_is_invalid_input() {
        // exists but is a directory, so it cannot be read as CSV
        let err = analyze_csv(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, DiligenceError::InvalidInput(_)));
    }
}
