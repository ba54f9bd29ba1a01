use anyhow::{ Context, Result };
use log::info;

use claimcheck::{ CheckError, FactChecker };

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Single claim check command
pub async fn execute<F: FactChecker>(
    checker: &F,
    claim: Option<&str>,
    output_format: OutputFormat
) -> Result<()> {
    let claim = match claim {
        Some(claim) => claim.to_string(),
        None => ui::prompt_claim().context("Failed to read claim")?,
    };

    let spinner = match output_format {
        OutputFormat::Text => Some(ui::spinner_with_message("Checking claim against news coverage...")),
        OutputFormat::Json => None,
    };
    let result = checker.verify(&claim).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(CheckError::InvalidInput(message)) => {
            ui::print_error(&message);
            return Err(CheckError::InvalidInput(message).into());
        }
        Err(e) => return Err(e).context("Claim check failed"),
    };
    info!("Claim checked: {} ({:.2})", report.verdict.label, report.verdict.confidence);

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => ui::display_report(&report),
    }

    Ok(())
}
