//! @ai:module:intent Format summaries and PB progressions for display (text, JSON)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_duration, format_summaries, format_history
//! @ai:module:depends_on category, progression, window, dates
//! @ai:module:stateless true

use crate::category::CategorySummary;
use crate::dates::format_date;
use crate::progression::Milestone;
use crate::window::Statistic;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Render seconds as `SS.ss`, `M:SS.ss` or `H:MM:SS.ss`; `-` when absent
/// @ai:example (Some(9.876)) -> "9.88"
/// @ai:example (Some(83.5)) -> "1:23.50"
/// @ai:example (Some(3725.25)) -> "1:02:05.25"
/// @ai:effects pure
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds else {
        return "-".to_string();
    };

    if seconds < 60.0 {
        return format!("{:.2}", seconds);
    }

    // Work in hundredths so rounding never produces "60.00" seconds.
    let centis = (seconds * 100.0).round() as u64;
    let hours = centis / 360_000;
    let minutes = (centis / 6_000) % 60;
    let secs = (centis % 6_000) as f64 / 100.0;

    if hours > 0 {
        format!("{}:{:02}:{:05.2}", hours, minutes, secs)
    } else {
        format!("{}:{:05.2}", minutes, secs)
    }
}

/// @ai:intent Format the per-category summary table
/// @ai:effects pure
pub fn format_summaries(
    summaries: &[CategorySummary],
    windows: &[usize],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(summaries).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(summaries).unwrap_or_default(),
        OutputFormat::Text => format_summaries_text(summaries, windows),
    }
}

fn format_summaries_text(summaries: &[CategorySummary], windows: &[usize]) -> String {
    let statistics: Vec<Statistic> = std::iter::once(Statistic::Single)
        .chain(windows.iter().map(|&n| Statistic::Average(n)))
        .collect();

    let label_width = summaries
        .iter()
        .map(|s| s.label.chars().count())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or(0);

    let mut output = String::new();

    let mut header = format!("{:<width$}", "Category", width = label_width);
    for statistic in &statistics {
        header.push_str(&format!("  {:>10}", heading(*statistic)));
    }
    output.push_str(&format!("{}\n", header.bold()));

    for summary in summaries {
        output.push_str(&format!("{:<width$}", summary.label, width = label_width));

        for statistic in &statistics {
            let cell = format!("{:>10}", format_duration(summary.value(*statistic)));
            if summary.value(*statistic).is_some() {
                output.push_str(&format!("  {}", cell.cyan()));
            } else {
                output.push_str(&format!("  {}", cell.dimmed()));
            }
        }
        output.push('\n');
    }

    output
}

fn heading(statistic: Statistic) -> String {
    match statistic {
        Statistic::Single => "Single".to_string(),
        Statistic::Average(n) => format!("Ao{}", n),
    }
}

/// @ai:intent Format a PB progression for one category and statistic
/// @ai:effects pure
pub fn format_history(
    label: &str,
    statistic: Statistic,
    milestones: &[Milestone],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(milestones).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(milestones).unwrap_or_default(),
        OutputFormat::Text => format_history_text(label, statistic, milestones),
    }
}

fn format_history_text(label: &str, statistic: Statistic, milestones: &[Milestone]) -> String {
    let title = format!("{} {} PB Progression", label, heading(statistic).to_uppercase());
    let mut output = format!("{}\n", title.bold());

    if milestones.is_empty() {
        output.push_str(&format!(
            "  No past PBs found for {}.\n",
            heading(statistic).to_uppercase()
        ));
        return output;
    }

    for (i, milestone) in milestones.iter().enumerate() {
        let value = format_duration(Some(milestone.value));
        let value = if i == 0 {
            value.green().bold()
        } else {
            value.normal()
        };

        output.push_str(&format!(
            "  {} {}\n",
            value,
            format!("({})", format_date(milestone.date)).dimmed()
        ));
    }

    output
}
