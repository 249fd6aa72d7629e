//! CLI command implementations

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod registrations;
pub mod reminders;
pub mod server;

use anyhow::{Context as _, Result};
use console::Term;
use eventmanager_api_client::{ApiError, ApiResult, ClientConfig, EventManagerClient, SessionStore};
use eventmanager_cli::output::format_duration;
use eventmanager_cli::progress;
use eventmanager_core::config::{Config, OutputFormat};
use eventmanager_telemetry::Timer;
use indicatif::ProgressBar;
use serde::Serialize;
use std::future::Future;

/// Everything a command needs besides its own arguments
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    format: OutputFormat,
    quiet: bool,
    no_session: bool,
}

impl Context {
    /// Context for one invocation
    pub fn new(config: Config, format: OutputFormat, quiet: bool) -> Self {
        Self {
            config,
            format,
            quiet,
            no_session: false,
        }
    }

    /// Keep the session in memory instead of the session file
    #[must_use]
    pub fn without_session_file(mut self) -> Self {
        self.no_session = true;
        self
    }

    /// API client using the configured server and the saved session
    pub fn client(&self) -> Result<EventManagerClient> {
        let client = if self.no_session {
            EventManagerClient::new(
                ClientConfig::from_schema(&self.config.schema),
                SessionStore::in_memory(),
            )?
        } else {
            EventManagerClient::from_schema(&self.config.schema)?
        };
        Ok(client)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Whether human-readable output should be printed
    pub fn is_text(&self) -> bool {
        !self.is_json() && !self.quiet
    }

    /// Spinner on stderr, hidden for JSON, quiet or non-terminal output
    pub fn spinner(&self, message: &str) -> ProgressBar {
        progress::spinner(message, self.is_text() && Term::stderr().is_term())
    }

    /// Await `request` behind a spinner showing `message`
    pub async fn track<T, F>(&self, message: &str, request: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let label = message.trim_end_matches('.');
        let spinner = self.spinner(message);
        let timer = Timer::start(label);
        let result = request.await;
        let elapsed = timer.stop();
        match result {
            Ok(_) => spinner.finish_and_clear(),
            Err(_) => progress::finish_error(
                &spinner,
                &format!("{label} ({})", format_duration(elapsed)),
            ),
        }
        result
    }

    /// Print `value` as JSON in JSON mode, otherwise run `text`
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce()) -> Result<()> {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else if !self.quiet {
            text();
        }
        Ok(())
    }
}

/// `given`, or read without echo from the terminal; `flag` names the
/// option to use when there is no terminal
pub fn password_or_prompt(given: Option<String>, prompt: &str, flag: &str) -> Result<String> {
    if let Some(password) = given {
        return Ok(password);
    }
    let term = Term::stderr();
    if !term.is_term() {
        anyhow::bail!(ApiError::validation(format!(
            "{prompt} is required; pass it with {flag}"
        )));
    }
    term.write_str(&format!("{prompt}: "))?;
    term.read_secure_line()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}

/// Ask a yes/no question on the terminal; anything but `y`/`yes` is no
pub fn confirm(question: &str) -> Result<bool> {
    let term = Term::stderr();
    if !term.is_term() {
        return Ok(false);
    }
    term.write_str(&format!("{question} [y/N] "))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmanager_core::config::ConfigSchema;

    fn context(format: OutputFormat) -> Context {
        let config = Config {
            schema: ConfigSchema::default(),
            path: None,
        };
        Context::new(config, format, false)
    }

    #[tokio::test]
    async fn test_track_passes_results_through() {
        let ctx = context(OutputFormat::Text);

        let ok = ctx.track("Loading...", async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err = ctx
            .track("Loading...", async { Err::<(), _>(ApiError::NotAuthenticated) })
            .await;
        assert!(matches!(err, Err(ApiError::NotAuthenticated)));
    }

    #[test]
    fn test_json_mode_is_not_text() {
        assert!(context(OutputFormat::Json).is_json());
        assert!(!context(OutputFormat::Json).is_text());
        assert!(context(OutputFormat::Text).is_text());
    }
}
