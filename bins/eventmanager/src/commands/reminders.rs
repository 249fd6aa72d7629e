//! Reminder commands

use super::Context;
use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use eventmanager_api_client::models::ReminderTiming;
use eventmanager_api_client::ApiError;
use eventmanager_cli::output::{format_count, format_timestamp, Status};
use eventmanager_cli::table::reminders_table;
use owo_colors::OwoColorize;

#[derive(Subcommand)]
pub enum RemindersAction {
    /// Get reminded before an event starts
    Set {
        /// Event ID
        id: i64,

        /// 1_day, 12_hours, 6_hours, 3_hours, 1_hour, 30_minutes or 15_minutes
        #[arg(long, default_value = "1_day")]
        timing: String,
    },

    /// Cancel a reminder
    Cancel {
        /// Event ID
        id: i64,
    },

    /// List your pending reminders
    List,
}

pub async fn run(action: RemindersAction, ctx: &Context) -> Result<()> {
    match action {
        RemindersAction::Set { id, timing } => set(ctx, id, &timing).await,
        RemindersAction::Cancel { id } => cancel(ctx, id).await,
        RemindersAction::List => list(ctx).await,
    }
}

async fn set(ctx: &Context, id: i64, timing: &str) -> Result<()> {
    let timing: ReminderTiming = timing.parse()?;
    let client = ctx.client()?;

    let event = ctx.track("Loading event...", client.events().get(id)).await?;
    let plan = client.reminders().plan(&event, timing, Utc::now())?;
    if plan.in_past {
        return Err(ApiError::validation(format!(
            "A reminder {} \"{}\" would be in the past; pick a shorter time",
            timing.label().to_lowercase(),
            event.title
        ))
        .into());
    }

    let response = ctx
        .track("Setting reminder...", client.reminders().set(id, timing))
        .await?;

    ctx.emit(&response, || {
        Status::success(response.base.message.as_deref().unwrap_or("Reminder set"));
        let remind_at = response
            .reminder
            .as_ref()
            .map_or_else(|| plan.remind_at.to_rfc3339(), |r| r.remind_at.clone());
        Status::info(&format!(
            "You will be reminded on {}",
            format_timestamp(&remind_at)
        ));
    })
}

async fn cancel(ctx: &Context, id: i64) -> Result<()> {
    let client = ctx.client()?;
    let response = ctx
        .track("Cancelling reminder...", client.reminders().cancel(id))
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Reminder cancelled"),
        );
    })
}

async fn list(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let response = ctx
        .track("Loading reminders...", client.reminders().mine())
        .await?;

    ctx.emit(&response, || {
        println!("{}", reminders_table(&response.reminders));
        if !response.reminders.is_empty() {
            println!();
            println!(
                "{}",
                format_count(response.count, "reminder", "reminders").dimmed()
            );
        }
    })
}
