//! Report rendering for terminal output
//!
//! Formatting helpers plus a plain-text renderer for the composed report.

use crate::analytics::{Report, TrendDirection};

const LINE_WIDTH: usize = 60;

/// Format a fraction (0.75 -> "75%") with appropriate precision
pub fn format_percentage(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if pct > 0.0 && pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar representation of a utilization value
pub fn format_bar(value: f64, width: usize) -> String {
    let clamped = value.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Render the full report as plain text
pub fn render_report(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} report: {}\n",
        capitalize(&report.period.to_string()),
        report.window
    ));
    out.push_str(&separator(LINE_WIDTH));
    out.push('\n');

    // Key statistics
    out.push_str(&format!("Total spent:       {}\n", report.total_spent));
    out.push_str(&format!("Daily average:     {}\n", report.daily_average));
    out.push_str(&format!("Records:           {}\n", report.record_count));
    out.push_str(&format!("Balance:           {}\n", report.balance));
    out.push_str(&format!("Available:         {}\n", report.available_balance));

    if !report.top_categories.is_empty() {
        out.push('\n');
        out.push_str("Top categories\n");
        for (rank, (category, amount)) in report.top_categories.iter().enumerate() {
            out.push_str(&format!("  {}. {}: {}\n", rank + 1, category, amount));
        }
    }

    if !report.budgets.is_empty() {
        out.push('\n');
        out.push_str("Budgets\n");
        for eval in &report.budgets {
            out.push_str(&format!(
                "  {:<20} {} {:>8} of {:>8} [{}]\n",
                eval.scope.to_string(),
                format_bar(eval.utilization, 10),
                eval.spent.to_string(),
                eval.limit.to_string(),
                eval.status
            ));
        }
    }

    if !report.goals.is_empty() {
        out.push('\n');
        out.push_str("Goals\n");
        for eval in &report.goals {
            out.push_str(&format!(
                "  {:<20} {} {} of {} ({})\n",
                eval.name,
                format_bar(eval.progress_fraction, 10),
                eval.progress,
                eval.target,
                format_percentage(eval.progress_fraction)
            ));
        }
    }

    let insight_lines = insight_lines(report);
    if !insight_lines.is_empty() {
        out.push('\n');
        out.push_str("Insights\n");
        for line in insight_lines {
            out.push_str(&format!("  - {}\n", line));
        }
    }

    out
}

fn insight_lines(report: &Report) -> Vec<String> {
    let insights = &report.insights;
    let mut lines = Vec::new();

    if let Some(anomaly) = &insights.anomaly {
        lines.push(format!(
            "Spending of {} is unusually high (recent average {})",
            anomaly.current_total, anomaly.historical_mean
        ));
    }

    for entry in &insights.high_spend {
        lines.push(format!(
            "{} accounts for {} of spending ({})",
            entry.category,
            format_percentage(entry.share),
            entry.amount
        ));
    }

    for entry in &insights.frequent_small {
        lines.push(format!(
            "{} small {} purchases (avg {}); consider consolidating",
            entry.count, entry.category, entry.average
        ));
    }

    for entry in &insights.large_transactions {
        lines.push(format!(
            "Large {} expense of {} (category average {})",
            entry.category, entry.amount, entry.category_mean
        ));
    }

    match insights.trend {
        Some(TrendDirection::Increasing) => lines.push("Spending is trending up".into()),
        Some(TrendDirection::Decreasing) => lines.push("Spending is trending down".into()),
        Some(TrendDirection::Stable) => lines.push("Spending is stable".into()),
        None => {}
    }

    if let Some(comparison) = &insights.comparison {
        let line = match comparison.change_pct {
            Some(pct) => format!(
                "{} vs last period ({:+.2}%)",
                comparison.change, pct
            ),
            None => format!("{} vs last period (no prior data)", comparison.change),
        };
        lines.push(line);
    }

    if let Some(hint) = &insights.savings_hint {
        lines.push(format!(
            "Trimming {} could save {}",
            hint.category, hint.potential_savings
        ));
    }

    lines
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
