use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;
use vc_diligence::benchmarks::load_benchmarks;
use vc_diligence::competitors::RegistryClient;
use vc_diligence::config::Config;
use vc_diligence::error::DiligenceError;
use vc_diligence::finance::analyze_csv;
use vc_diligence::memo::generate_memo;
use vc_diligence::minimax::MiniMaxClient;
use vc_diligence::profile::extract_company_profile;

const DEFAULT_CSV_PATH: &str = "financials.csv";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\nError: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

async fn run() -> vc_diligence::Result<()> {
    let config = Config::from_env();
    let model = Arc::new(MiniMaxClient::new(&config));
    let registry = RegistryClient::new();

    println!("{}", "=".repeat(60));
    println!("VC Diligence Pipeline");
    println!("{}", "=".repeat(60));

    // Step 1: Read startup description (inline text or file path)
    println!("\nStep 1: Reading startup description...");
    let description = read_startup_description()?;
    println!("  Done.");

    // Step 2: Extract company profile
    println!("\nStep 2: Analyzing company description...");
    let profile = extract_company_profile(model.as_ref(), &description).await?;
    println!("  Done.");

    // Step 3: Print extracted profile
    println!("\nStep 3: Extracted company profile:");
    println!("---");
    println!("  business_model: {:?}", profile.business_model);
    println!("  customer_type: {:?}", profile.customer_type);
    println!("  stage: {:?}", profile.stage);
    println!("  milestone: {:?}", profile.milestone);
    println!("  mentioned_competitors: {:?}", profile.mentioned_competitors);
    println!("---\n");

    // Step 4: Find competitors if a business model was extracted
    println!("Step 4: Finding competitors...");
    let competitors = match profile.business_model.as_deref().map(str::trim) {
        Some(keywords) if !keywords.is_empty() => {
            let found = registry.find_competitors(keywords).await;
            println!("  Found {} competitor(s).", found.len());
            found
        }
        _ => {
            println!("  Skipped (no business model available).");
            Vec::new()
        }
    };
    if !competitors.is_empty() {
        let preview: Vec<&str> = competitors.iter().take(5).map(String::as_str).collect();
        let suffix = if competitors.len() > 5 { " ..." } else { "" };
        println!("  Competitors: {}{}", preview.join(", "), suffix);
    }

    // Step 5: Load benchmarks
    println!("\nStep 5: Loading benchmarks...");
    let benchmarks = load_benchmarks(&config.benchmarks_path)?;
    println!("  Loaded {} benchmark set(s).", benchmarks.len());

    // Step 6: Prompt for CSV path (or use default)
    println!("\nStep 6: Reading financial data...");
    let csv_path = prompt_line(&format!("CSV file path [{}]: ", DEFAULT_CSV_PATH))?;
    let csv_path = if csv_path.is_empty() {
        DEFAULT_CSV_PATH.to_string()
    } else {
        csv_path
    };

    // Step 7: Analyze financials
    println!("\nStep 7: Analyzing financials...");
    let metrics = analyze_csv(&csv_path)?;
    println!("  Done.");

    // Step 8: Print financial metrics
    println!("\nStep 8: Financial metrics:");
    println!("---");
    println!("  Monthly burn: {:.2}", metrics.burn);
    println!("  Runway (months): {:.2}", metrics.runway);
    println!("  Downside scenario burn: {:.2}", metrics.downside_burn);
    println!("  Runway at downside (months): {:.2}", metrics.runway_at_downside);
    println!("---\n");

    // Step 9: Generate memo
    println!("Step 9: Generating diligence memo...");
    generate_memo(
        model.as_ref(),
        &profile,
        &metrics,
        &benchmarks,
        &config.memo_path,
    )
    .await?;
    println!("  Done.");

    info!("Pipeline run complete");

    println!("\nStep 10: Complete.");
    println!("{}", "=".repeat(60));
    println!("Success!");
    println!("Memo saved to: {}", config.memo_path.display());
    println!("{}", "=".repeat(60));

    Ok(())
}

/// Prompt for the startup description. A single line naming an existing
/// file loads that file; otherwise lines are collected until a blank one.
fn read_startup_description() -> vc_diligence::Result<String> {
    println!("\nEnter startup description:");
    println!("  - Type your description and press Enter twice to finish");
    println!("  - Or enter a file path (e.g. description.txt) to load from file");
    println!();

    let first_line = prompt_line("Description or file path: ")?;
    if first_line.is_empty() {
        return Err(DiligenceError::InvalidInput(
            "no description or file path provided".to_string(),
        ));
    }

    let path = Path::new(&first_line);
    if path.is_file() {
        let text = std::fs::read_to_string(path)?;
        return Ok(text.trim().to_string());
    }

    let mut lines = vec![first_line];
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

fn prompt_line(prompt: &str) -> vc_diligence::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
