//! Backend server selection

use super::Context;
use anyhow::{Context as _, Result};
use clap::Subcommand;
use eventmanager_cli::output::Status;
use eventmanager_core::config::{Config, ConfigSchema, ServerConfig};
use eventmanager_core::Error;
use serde::Serialize;

#[derive(Subcommand)]
pub enum ServerAction {
    /// Show the server in use
    Show,

    /// Change the server host and/or port
    Set {
        /// Host name or IP address
        #[arg(long)]
        host: Option<String>,

        /// TCP port
        #[arg(long)]
        port: Option<u16>,

        /// Full API base URL, e.g. https://events.example.edu/api/
        #[arg(long, conflicts_with_all = ["host", "port"])]
        url: Option<String>,
    },

    /// Go back to the default server
    Reset,
}

#[derive(Serialize)]
struct ServerInfo {
    host: String,
    port: u16,
    base_url: String,
    config_file: Option<String>,
    session_file: Option<String>,
}

pub fn run(action: ServerAction, ctx: &Context) -> Result<()> {
    match action {
        ServerAction::Show => show(ctx),
        ServerAction::Set { host, port, url } => set(ctx, host, port, url),
        ServerAction::Reset => reset(ctx),
    }
}

fn info(config: &Config) -> ServerInfo {
    let server = &config.schema.server;
    ServerInfo {
        host: server.host.clone(),
        port: server.port,
        base_url: server.base_url(),
        config_file: config.path.as_ref().map(|p| p.display().to_string()),
        session_file: config
            .schema
            .session
            .resolved_path()
            .map(|p| p.display().to_string()),
    }
}

fn print_info(info: &ServerInfo) {
    Status::header("Server");
    Status::field("Host", &info.host);
    Status::field("Port", &info.port.to_string());
    Status::field("Base URL", &info.base_url);
    Status::field("Config file", info.config_file.as_deref().unwrap_or("(defaults)"));
    Status::field("Session file", info.session_file.as_deref().unwrap_or("(not saved)"));
}

fn show(ctx: &Context) -> Result<()> {
    let info = info(&ctx.config);
    ctx.emit(&info, || print_info(&info))
}

fn set(ctx: &Context, host: Option<String>, port: Option<u16>, url: Option<String>) -> Result<()> {
    if host.is_none() && port.is_none() && url.is_none() {
        return Err(Error::validation("Nothing to change; pass --host, --port or --url").into());
    }

    let mut schema = ctx.config.stored_schema()?;
    let server = &mut schema.server;
    if let Some(url) = url {
        server.base_url = Some(url);
    } else {
        server.base_url = None;
        if let Some(host) = host {
            server.host = host.trim().to_string();
        }
        if let Some(port) = port {
            server.port = port;
        }
    }

    save(ctx, schema, "Server updated")
}

fn reset(ctx: &Context) -> Result<()> {
    let mut schema = ctx.config.stored_schema()?;
    schema.server = ServerConfig::default();
    save(ctx, schema, "Server reset to defaults")
}

/// Persist `schema` to the writable config file and show the result
fn save(ctx: &Context, schema: ConfigSchema, message: &str) -> Result<()> {
    let path = ctx
        .config
        .writable_path()
        .ok_or_else(|| Error::config("No configuration directory available"))?;
    let config = Config {
        schema,
        path: Some(path.clone()),
    };
    config
        .save(&path)
        .with_context(|| format!("Could not save {}", path.display()))?;

    let info = info(&config);
    ctx.emit(&info, || {
        Status::success(message);
        print_info(&info);
    })
}
