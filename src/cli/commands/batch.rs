use anyhow::{ Context, Result };
use colored::*;
use log::{ info, warn };
use std::fs;
use std::path::Path;

use claimcheck::{ CheckReport, FactChecker };

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Read the claims of a batch file, one per non-empty line
pub fn read_claims(path: &Path) -> Result<Vec<String>> {
    let contents = fs
        ::read_to_string(path)
        .with_context(|| format!("Failed to read claims file {}", path.display()))?;
    Ok(
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    )
}

/// Batch claim check command
pub async fn execute<F: FactChecker>(
    checker: &F,
    claims_path: &Path,
    output_format: OutputFormat
) -> Result<()> {
    let claims = read_claims(claims_path)?;
    if claims.is_empty() {
        ui::print_warning(&format!("No claims found in {}", claims_path.display()));
        return Ok(());
    }
    info!("Checking {} claims from {}", claims.len(), claims_path.display());

    let progress = match output_format {
        OutputFormat::Text => Some(ui::create_progress_bar(claims.len() as u64, "Checking claims")),
        OutputFormat::Json => None,
    };

    let mut reports: Vec<CheckReport> = Vec::with_capacity(claims.len());
    let mut rejected: Vec<(String, String)> = Vec::new();
    for claim in &claims {
        match checker.verify(claim).await {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!("Skipping claim '{}': {}", claim, e);
                rejected.push((claim.clone(), e.to_string()));
            }
        }
        if let Some(progress) = &progress {
            progress.inc(1);
        }
    }
    if let Some(progress) = progress {
        progress.finish_with_message("Done");
    }

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            ui::print_header("Batch Results");
            println!("{:<22} {:>10}  {}", "VERDICT".bold(), "CONFIDENCE".bold(), "CLAIM".bold());
            for report in &reports {
                // pad before coloring so escape codes don't skew the columns
                let label = format!("{:<22}", report.verdict.label.to_string());
                println!(
                    "{} {:>9.1}%  {}",
                    label.color(ui::label_color(report.verdict.label)).bold(),
                    report.verdict.confidence_percent(),
                    report.claim
                );
            }
            for (claim, reason) in &rejected {
                ui::print_warning(&format!("Skipped '{}': {}", claim, reason));
            }
            ui::print_success(&format!("Checked {} of {} claims", reports.len(), claims.len()));
        }
    }

    Ok(())
}

