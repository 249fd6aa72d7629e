//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use eventmanager_core::validation::{parse_date, parse_time};
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(console::measure_text_width(message)));
    }

    /// Print an aligned `label: value` line
    pub fn field(label: &str, value: &str) {
        println!("  {:<14} {}", format!("{label}:").dimmed(), value);
    }
}

/// Format a duration for display
#[must_use]
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.1}s")
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{mins}m {remaining_secs:.0}s")
    }
}

/// Format a count with singular/plural
#[must_use]
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// `2025-12-15` as `Dec 15, 2025`; anything unreadable is returned as is
#[must_use]
pub fn format_event_date(date: &str) -> String {
    parse_date(date).map_or_else(|| date.to_string(), |d| d.format("%b %-d, %Y").to_string())
}

/// `14:00:00` as `2:00 PM`; anything unreadable is returned as is
#[must_use]
pub fn format_event_time(time: &str) -> String {
    parse_time(time).map_or_else(|| time.to_string(), |t| t.format("%-I:%M %p").to_string())
}

/// An RFC 3339 timestamp as `Dec 15, 2025 9:00 AM` in its own offset;
/// anything unreadable is returned as is
#[must_use]
pub fn format_timestamp(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp.trim()).map_or_else(
        |_| timestamp.to_string(),
        |t| t.format("%b %-d, %Y %-I:%M %p").to_string(),
    )
}

/// Uppercase the first character
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
