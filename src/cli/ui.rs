use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Input };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use claimcheck::{ CheckReport, RetrievalStatus, ScoredArticle, VerdictLabel };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = terminal_width();
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Create a new progress bar
pub fn create_progress_bar(length: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}"
            )
            .unwrap()
            .progress_chars("##-")
    );
    pb.set_message(message.to_string());
    pb
}

/// Color used for each verdict outcome
pub fn label_color(label: VerdictLabel) -> Color {
    match label {
        VerdictLabel::LikelyTrue => Color::Green,
        VerdictLabel::PossiblyTrue => Color::Cyan,
        VerdictLabel::Unverified => Color::Yellow,
        VerdictLabel::LikelyFalse => Color::Red,
        VerdictLabel::ContradictoryReports => Color::Magenta,
    }
}

/// Verdict label rendered in the color of its outcome
pub fn colored_label(label: VerdictLabel) -> ColoredString {
    label.to_string().color(label_color(label)).bold()
}

/// Print a verdict with its confidence
pub fn print_verdict(report: &CheckReport) {
    let symbol = match report.verdict.label {
        VerdictLabel::LikelyTrue => "✓",
        VerdictLabel::PossiblyTrue => "~",
        VerdictLabel::Unverified => "?",
        VerdictLabel::LikelyFalse => "✗",
        VerdictLabel::ContradictoryReports => "⚠",
    };
    println!(
        "{} {} ({:.1}% confidence)",
        symbol,
        colored_label(report.verdict.label),
        report.verdict.confidence_percent()
    );
}

/// Print the ranked sources backing a verdict
pub fn display_sources(sources: &[ScoredArticle]) {
    if sources.is_empty() {
        println!("{}", "No sources found.".dimmed());
        return;
    }
    let width = terminal_width().saturating_sub(12).max(20);
    for (i, scored) in sources.iter().enumerate() {
        let outlet = scored.article.source.as_deref().unwrap_or("Unknown");
        let heading = format!("{}. {} ({})", i + 1, scored.article.title, outlet);
        for (j, line) in wrap(&heading, width).iter().enumerate() {
            if j == 0 {
                println!("  {}", line);
            } else {
                println!("     {}", line);
            }
        }
        println!("     {} {:.3}", "similarity:".dimmed(), scored.similarity);
        if let Some(link) = &scored.article.link {
            println!("     {}", link.underline().blue());
        }
    }
}

/// Print a full claim report
pub fn display_report(report: &CheckReport) {
    print_header("Claim Check");
    print_result("Claim", &report.claim);
    print_result("Search query", &report.query);
    match &report.retrieval {
        RetrievalStatus::Found { count } => print_result("Articles", &count.to_string()),
        RetrievalStatus::NoMatches => print_warning("No news items found"),
        RetrievalStatus::Unavailable { reason } => {
            print_warning(&format!("Article source unavailable: {}", reason))
        }
    }
    if let Some(reason) = &report.scoring_degraded {
        print_warning(&format!("Similarity scoring degraded: {}", reason));
    }

    print_header("Verdict");
    print_verdict(report);
    print_text(&report.verdict.summary);

    if report.signals.support_hits + report.signals.refute_hits > 0 {
        println!(
            "\n{} {} supporting, {} refuting phrases (support posterior {:.2})",
            "Signals:".bold(),
            report.signals.support_hits,
            report.signals.refute_hits,
            report.signals.support_posterior
        );
    }
    if report.signals.sensational_hits > 0 {
        print_warning(
            &format!(
                "{} sensational phrases found in coverage",
                report.signals.sensational_hits
            )
        );
    }

    print_header("Sources");
    display_sources(&report.sources);
}

/// Ask the user for a claim
pub fn prompt_claim() -> std::io::Result<String> {
    Input::with_theme(&get_theme())
        .with_prompt("Enter a claim to check")
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Display a spinner while waiting for an operation to complete
pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap()
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn terminal_width() -> usize {
    let (_, columns) = Term::stdout().size();
    if columns == 0 { 80 } else { columns as usize }
}
