//! Plain-text scenario summary export.
//!
//! One labeled block per scenario in a fixed field order, blocks separated
//! by a literal `---` line. Existing exported summaries are parsed by
//! downstream tooling, so the labels and order are load-bearing.

use super::domain::Scenario;
use std::fmt::Write;

const BLANK: &str = "-";

/// Format a rupee amount with the Indian digit grouping: the last three
/// digits form one group, every group before that has two digits
/// (12,34,567).
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round().abs() as u64;
    let digits = rounded.to_string();

    let mut grouped = String::new();
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 {
            let remaining = digits.len() - index;
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                grouped.push(',');
            }
        }
        grouped.push(ch);
    }

    let sign = if amount.round() < 0.0 { "-" } else { "" };
    format!("{sign}\u{20B9}{grouped}")
}

fn text_or_blank(value: &str) -> &str {
    if value.is_empty() {
        BLANK
    } else {
        value
    }
}

fn list_or_blank(values: &[String]) -> String {
    if values.is_empty() {
        BLANK.to_string()
    } else {
        values.join(", ")
    }
}

fn percent_or_blank(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.0}%", value * 100.0),
        None => BLANK.to_string(),
    }
}

fn rupees_or_blank(value: Option<f64>) -> String {
    match value {
        Some(value) => format_inr(value),
        None => BLANK.to_string(),
    }
}

/// Render the whole collection in export order.
pub fn export_summary(scenarios: &[Scenario]) -> String {
    let mut out = String::new();

    for (index, scenario) in scenarios.iter().enumerate() {
        if index > 0 {
            out.push_str("---\n");
        }
        write_block(&mut out, scenario);
    }

    out
}

fn write_block(out: &mut String, scenario: &Scenario) {
    let metrics = &scenario.metrics;

    let _ = writeln!(out, "Name: {}", text_or_blank(&scenario.name));
    let _ = writeln!(out, "Stream: {}", text_or_blank(&scenario.stream));
    let _ = writeln!(out, "Course: {}", text_or_blank(&scenario.course));
    let _ = writeln!(
        out,
        "College Type: {}",
        scenario
            .college_type
            .map(|college_type| college_type.label())
            .unwrap_or(BLANK)
    );
    let _ = writeln!(out, "College: {}", text_or_blank(&scenario.college));
    let _ = writeln!(out, "Skills: {}", list_or_blank(&scenario.skills));
    let _ = writeln!(out, "Upskill: {}", list_or_blank(&scenario.upskill));
    let _ = writeln!(
        out,
        "Scholarship: {}",
        scenario.scholarship.as_deref().map(text_or_blank).unwrap_or(BLANK)
    );
    let _ = writeln!(out, "NPV: {}", rupees_or_blank(metrics.npv));
    let _ = writeln!(
        out,
        "ROI: {}",
        metrics
            .roi
            .map(|roi| format!("{roi:.2}"))
            .unwrap_or_else(|| BLANK.to_string())
    );
    let _ = writeln!(
        out,
        "Employment Probability: {}",
        percent_or_blank(metrics.employment_prob)
    );
    let _ = writeln!(
        out,
        "Starting Salary: {}",
        rupees_or_blank(metrics.starting_salary)
    );
    let _ = writeln!(
        out,
        "Time to Job: {}",
        metrics
            .time_to_job
            .map(|months| format!("{months} months"))
            .unwrap_or_else(|| BLANK.to_string())
    );
    let _ = writeln!(
        out,
        "Scholarship Odds: {}",
        percent_or_blank(metrics.scholarship_odds)
    );
}
