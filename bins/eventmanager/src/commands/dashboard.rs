//! Dashboard command

use super::Context;
use anyhow::Result;
use eventmanager_api_client::models::{AdminDashboardResponse, DashboardResponse};
use eventmanager_cli::output::{capitalize_first, format_event_date, Status};
use eventmanager_cli::table::Table;

pub async fn run(admin: bool, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    if admin {
        let response = ctx
            .track("Loading admin dashboard...", client.dashboard().admin())
            .await?;
        ctx.emit(&response, || print_admin(&response))
    } else {
        let response = ctx
            .track("Loading dashboard...", client.dashboard().user())
            .await?;
        ctx.emit(&response, || print_user(&response))
    }
}

fn print_user(response: &DashboardResponse) {
    let title = response.user.as_ref().map_or_else(
        || "Dashboard".to_string(),
        |u| format!("Welcome, {}", u.name),
    );
    Status::header(&title);

    let stats = &response.stats;
    Status::field("Events", &stats.total_events.to_string());
    Status::field("Registrations", &stats.my_registrations.to_string());
    Status::field("Reminders", &stats.my_reminders.to_string());
    if let Some(created) = stats.events_created {
        Status::field("You created", &created.to_string());
    }
    if let Some(users) = stats.total_users {
        Status::field("Users", &users.to_string());
    }
}

fn print_admin(response: &AdminDashboardResponse) {
    let stats = &response.stats;
    Status::header("Admin dashboard");
    Status::field("Users", &format!(
        "{} ({} students, {} admins)",
        stats.total_users, stats.total_students, stats.total_admins
    ));
    Status::field("Events", &format!("{} ({} active)", stats.total_events, stats.active_events));
    Status::field("Registrations", &stats.total_registrations.to_string());
    Status::field("Last 7 days", &format!(
        "{} registrations, {} new events",
        stats.recent_registrations, stats.recent_events
    ));

    if !response.top_events.is_empty() {
        Status::header("Top events");
        let mut table = Table::new(["EVENT", "TITLE", "DATE", "REGISTRATIONS"]);
        for top in &response.top_events {
            table.push_row([
                top.event_id.to_string(),
                top.event_title.clone(),
                format_event_date(&top.event_date),
                top.registration_count.to_string(),
            ]);
        }
        println!("{}", table.render());
    }

    if !response.event_registration_details.is_empty() {
        Status::header("Registrations by event");
        let mut table = Table::new(["EVENT", "TITLE", "CATEGORY", "FILLED", "STATUS"]);
        for detail in &response.event_registration_details {
            let status = match (detail.is_active, detail.is_full) {
                (false, _) => "inactive",
                (true, true) => "full",
                (true, false) => "open",
            };
            table.push_row([
                detail.event_id.to_string(),
                detail.event_title.clone(),
                capitalize_first(&detail.event_category),
                format!("{}/{}", detail.registration_count, detail.max_participants),
                status.to_string(),
            ]);
        }
        println!("{}", table.render());
    }
}
