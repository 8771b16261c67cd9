use colored::Colorize;

use crate::eligibility::{EligibilityResult, Readiness};

/// Eligibility result with color
pub fn format_result(result: EligibilityResult) -> String {
    match result {
        EligibilityResult::Eligible => result.as_str().green().to_string(),
        EligibilityResult::NeedsReview => result.as_str().yellow().to_string(),
        EligibilityResult::NotEligible => result.as_str().red().to_string(),
    }
}

/// Readiness with color
pub fn format_readiness(readiness: Readiness) -> String {
    match readiness {
        Readiness::Ready => readiness.as_str().green().to_string(),
        Readiness::MissingInfo => readiness.as_str().yellow().to_string(),
        Readiness::NotReady => readiness.as_str().red().to_string(),
    }
}

/// Format a case id truncated for display
pub fn format_case_id(id: &str) -> String {
    if id.chars().count() <= 20 {
        id.to_string()
    } else {
        let head: String = id.chars().take(8).collect();
        let tail: String = id.chars().rev().take(8).collect::<Vec<_>>().into_iter().rev().collect();
        format!("{}...{}", head, tail)
    }
}

/// Format timestamp in human-readable format
pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Prompt user for yes/no confirmation
pub fn confirm_action(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} (y/N): ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print a formatted table border
pub fn print_table_border(width: usize) {
    println!("{}", "=".repeat(width));
}

/// Print a table row with columns
pub fn print_table_row(columns: &[&str], widths: &[usize]) {
    let mut row = String::new();
    for (i, col) in columns.iter().enumerate() {
        if i < widths.len() {
            row.push_str(&format!("{:<width$}  ", col, width = widths[i]));
        }
    }
    println!("{}", row.trim_end());
}
