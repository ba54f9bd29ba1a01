use anyhow::Result;

use claimcheck::KeywordExtractor;

use crate::cli::ui;
use crate::cli::OutputFormat;

/// Keyword extraction command
pub fn execute(extractor: &KeywordExtractor, claim: &str, output_format: OutputFormat) -> Result<()> {
    let keywords = extractor.keywords(claim);
    let query = extractor.extract_query(claim);

    match output_format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "claim": claim,
                "keywords": keywords,
                "query": query,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            ui::print_result("Keywords", &keywords.join(", "));
            ui::print_result("Query", &query);
            if keywords.is_empty() {
                ui::print_info("No keywords survived filtering; the whole claim is used as the query");
            }
        }
    }
    Ok(())
}
