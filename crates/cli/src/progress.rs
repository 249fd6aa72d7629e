//! Progress indicators
//!
//! Spinners shown on stderr while a request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Create a spinner for a request in flight.
///
/// A hidden spinner is returned when `visible` is false (quiet or JSON
/// output) so callers can use it unconditionally.
#[must_use]
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Finish a spinner with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.set_style(message_only());
    pb.finish_with_message(format!("{} {message}", "✓".green()));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.set_style(message_only());
    pb.finish_with_message(format!("{} {message}", "✗".red()));
}

fn message_only() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Loading events...", true);
        finish_success(&pb, "Loaded");
        assert!(pb.is_finished());
    }

    #[test]
    fn test_hidden_spinner() {
        let pb = spinner("Loading events...", false);
        assert!(pb.is_hidden());
        finish_error(&pb, "Failed");
    }
}
