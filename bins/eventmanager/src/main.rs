//! Event Manager CLI
//!
//! Browse university events, register for them and set reminders; admins
//! can also create, edit and delete events.

use clap::{Parser, Subcommand, ValueEnum};
use eventmanager_api_client::ApiError;
use eventmanager_core::config::{Config, OutputFormat};
use eventmanager_core::error::exit_codes;
use eventmanager_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{auth, dashboard, events, registrations, reminders, server, Context};

/// Command-line client for the university Event Manager
#[derive(Parser)]
#[command(name = "eventmanager")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "EVENTMANAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format (defaults to the configured one)
    #[arg(short, long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, global = true, env = "EVENTMANAGER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Do not read or write the session file
    #[arg(long, global = true)]
    no_session: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change which backend server to talk to
    Server {
        #[command(subcommand)]
        action: server::ServerAction,
    },

    /// Sign up, log in and manage your account
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },

    /// Browse and manage events
    Events {
        #[command(subcommand)]
        action: events::EventsAction,
    },

    /// Register for an event
    Register(registrations::RegisterArgs),

    /// Cancel your registration for an event
    Unregister {
        /// Event ID
        id: i64,
    },

    /// List the events you are registered for
    Registrations,

    /// Event reminders
    Reminders {
        #[command(subcommand)]
        action: reminders::RemindersAction,
    },

    /// Show your dashboard
    Dashboard {
        /// Show the admin overview with every registration
        #[arg(long)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let mut telemetry = TelemetryConfig::for_verbosity(cli.verbose, cli.quiet).ansi(!cli.no_color);
    if let Some(dir) = &cli.log_dir {
        telemetry = telemetry.log_dir(dir);
    }
    if let Err(e) = eventmanager_telemetry::init_with_config(telemetry) {
        eprintln!("{} {e}", "Warning:".yellow().bold());
    }

    tracing::debug!(
        session_id = %eventmanager_telemetry::session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "eventmanager starting"
    );

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            return to_exit_code(exit_codes::CONFIG_ERROR);
        }
    };

    if !config.schema.output.color {
        owo_colors::set_override(false);
    }

    let format = cli.format.map_or(config.schema.output.format, OutputFormat::from);
    let mut ctx = Context::new(config, format, cli.quiet);
    if cli.no_session {
        ctx = ctx.without_session_file();
    }

    let result = match cli.command {
        Commands::Server { action } => server::run(action, &ctx),
        Commands::Auth { action } => auth::run(action, &ctx).await,
        Commands::Events { action } => events::run(action, &ctx).await,
        Commands::Register(args) => registrations::register(args, &ctx).await,
        Commands::Unregister { id } => registrations::unregister(id, &ctx).await,
        Commands::Registrations => registrations::list(&ctx).await,
        Commands::Reminders { action } => reminders::run(action, &ctx).await,
        Commands::Dashboard { admin } => dashboard::run(admin, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{} {e}", "Error:".red().bold());
            to_exit_code(exit_code_for(&e))
        }
    }
}

/// Exit status for a failed command
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(api) = err.downcast_ref::<ApiError>() {
        return api.exit_code();
    }
    if let Some(core) = err.downcast_ref::<eventmanager_core::Error>() {
        return core.code.exit_code();
    }
    exit_codes::FAILURE
}

fn to_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_for() {
        let err = anyhow::Error::new(ApiError::NotAuthenticated);
        assert_eq!(exit_code_for(&err), exit_codes::NOT_AUTHENTICATED);

        let config_err =
            eventmanager_core::Error::invalid_config_value("server.port", "must be 1-65535");
        let err = anyhow::Error::new(config_err);
        assert_eq!(exit_code_for(&err), exit_codes::CONFIG_ERROR);

        assert_eq!(exit_code_for(&anyhow::anyhow!("boom")), exit_codes::FAILURE);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = ["eventmanager", "events", "list", "--format", "json", "-vv"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.format, Some(FormatArg::Json)));
        assert_eq!(cli.verbose, 2);
    }
}
