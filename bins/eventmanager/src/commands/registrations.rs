//! Event registration commands

use super::Context;
use anyhow::Result;
use clap::Args;
use eventmanager_api_client::models::EventRegistrationRequest;
use eventmanager_api_client::ApiError;
use eventmanager_cli::output::{format_count, format_event_date, Status};
use eventmanager_cli::table::registrations_table;
use owo_colors::OwoColorize;

#[derive(Args)]
pub struct RegisterArgs {
    /// Event ID
    id: i64,

    /// Attendee name (defaults to your account name)
    #[arg(long)]
    name: Option<String>,

    /// Attendee email (defaults to your account email)
    #[arg(long)]
    email: Option<String>,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// University student ID
    #[arg(long)]
    student_id: String,
}

pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let session = client.session();
    if !session.is_logged_in() {
        return Err(ApiError::NotAuthenticated.into());
    }

    let details = EventRegistrationRequest {
        name: args.name.or_else(|| session.user_name()).unwrap_or_default(),
        email: args.email.or_else(|| session.user_email()).unwrap_or_default(),
        phone: args.phone,
        student_id: args.student_id,
    };

    let response = ctx
        .track(
            "Registering...",
            client.registrations().register(args.id, &details),
        )
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Registered for event"),
        );
        if let Some(registration) = &response.registration {
            Status::info(&format!(
                "{} on {} at {}",
                registration.event_title,
                format_event_date(&registration.event_date),
                registration.event_location
            ));
        }
    })
}

pub async fn unregister(id: i64, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let response = ctx
        .track("Cancelling registration...", client.registrations().cancel(id))
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Registration cancelled"),
        );
    })
}

pub async fn list(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let response = ctx
        .track("Loading registrations...", client.registrations().mine())
        .await?;

    ctx.emit(&response, || {
        println!("{}", registrations_table(&response.registrations));
        if !response.registrations.is_empty() {
            println!();
            println!(
                "{}",
                format_count(response.count, "registration", "registrations").dimmed()
            );
        }
    })
}
