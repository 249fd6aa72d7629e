//! Event commands

use super::{confirm, Context};
use anyhow::Result;
use clap::{Args, Subcommand};
use eventmanager_api_client::endpoints::{EventFilter, EventUpdate};
use eventmanager_api_client::models::{
    Category, CreateEventRequest, EventData, DEFAULT_MAX_PARTICIPANTS,
};
use eventmanager_api_client::ApiError;
use eventmanager_cli::output::{
    capitalize_first, format_count, format_event_date, format_event_time, format_timestamp, Status,
};
use eventmanager_cli::table::events_table;
use owo_colors::OwoColorize;

#[derive(Subcommand)]
pub enum EventsAction {
    /// List active events, soonest first
    List {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Text to look for in title, description and location
        #[arg(long)]
        search: Option<String>,

        /// Hide events that have already started
        #[arg(long)]
        upcoming: bool,
    },

    /// Show one event
    Show {
        /// Event ID
        id: i64,
    },

    /// Create an event (admin only)
    Create(CreateArgs),

    /// Change an event (admin only); omitted fields keep their values
    Update {
        /// Event ID
        id: i64,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete an event (admin only)
    Delete {
        /// Event ID
        id: i64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    title: String,

    #[arg(long)]
    description: String,

    /// YYYY-MM-DD
    #[arg(long)]
    date: String,

    /// HH:MM (24-hour)
    #[arg(long)]
    time: String,

    #[arg(long)]
    location: String,

    /// academic, cultural, sports, workshop, seminar or other
    #[arg(long)]
    category: String,

    #[arg(long, default_value_t = DEFAULT_MAX_PARTICIPANTS)]
    max_participants: i64,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,

    /// HH:MM (24-hour)
    #[arg(long)]
    time: Option<String>,

    #[arg(long)]
    location: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    max_participants: Option<i64>,
}

impl From<UpdateArgs> for EventUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            title: args.title,
            description: args.description,
            date: args.date,
            time: args.time,
            location: args.location,
            category: args.category,
            max_participants: args.max_participants,
        }
    }
}

pub async fn run(action: EventsAction, ctx: &Context) -> Result<()> {
    match action {
        EventsAction::List {
            category,
            search,
            upcoming,
        } => list(ctx, category.as_deref(), search, upcoming).await,
        EventsAction::Show { id } => show(ctx, id).await,
        EventsAction::Create(args) => create(ctx, args).await,
        EventsAction::Update { id, fields } => update(ctx, id, fields.into()).await,
        EventsAction::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

async fn list(
    ctx: &Context,
    category: Option<&str>,
    search: Option<String>,
    upcoming: bool,
) -> Result<()> {
    let mut filter = EventFilter::new();
    if let Some(category) = category {
        filter = filter.with_category(category.parse::<Category>()?);
    }
    if let Some(search) = search {
        filter = filter.with_search(search);
    }
    if upcoming {
        filter = filter.upcoming();
    }

    let client = ctx.client()?;
    let response = ctx
        .track("Loading events...", client.events().list(&filter))
        .await?;

    ctx.emit(&response, || {
        println!("{}", events_table(&response.events));
        if !response.events.is_empty() {
            println!();
            println!(
                "{}",
                format_count(response.count, "event", "events").dimmed()
            );
        }
    })
}

fn print_event(event: &EventData) {
    Status::header(&event.title);
    Status::field("ID", &event.id.to_string());
    Status::field("Category", event.category.display_name());
    Status::field("Date", &format_event_date(&event.date));
    Status::field("Time", &format_event_time(&event.time));
    Status::field("Location", &event.location);
    let seats = if event.is_full {
        "Full".red().to_string()
    } else {
        format!("{} of {} left", event.seats_left(), event.max_participants)
    };
    Status::field("Seats", &seats);
    if let Some(by) = &event.created_by_name {
        Status::field("Organizer", &capitalize_first(by));
    }
    if let Some(created) = &event.created_at {
        Status::field("Created", &format_timestamp(created));
    }
    if event.is_registered {
        Status::field("Registered", &"yes".green().to_string());
    }
    if event.has_reminder {
        Status::field("Reminder", &"set".green().to_string());
    }
    if !event.description.is_empty() {
        println!();
        println!("{}", event.description);
    }
}

async fn show(ctx: &Context, id: i64) -> Result<()> {
    let client = ctx.client()?;
    let event = ctx.track("Loading event...", client.events().get(id)).await?;
    ctx.emit(&event, || print_event(&event))
}

async fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let request = CreateEventRequest {
        title: args.title,
        description: args.description,
        date: args.date,
        time: args.time,
        location: args.location,
        category: args.category,
        max_participants: args.max_participants,
    };

    let client = ctx.client()?;
    let response = ctx
        .track("Creating event...", client.events().create(&request))
        .await?;

    ctx.emit(&response, || {
        Status::success(response.base.message.as_deref().unwrap_or("Event created"));
        if let Some(event) = &response.event {
            print_event(event);
        }
    })
}

async fn update(ctx: &Context, id: i64, changes: EventUpdate) -> Result<()> {
    if changes.is_empty() {
        return Err(ApiError::validation("Nothing to update; pass at least one field").into());
    }

    let client = ctx.client()?;
    let response = ctx
        .track("Updating event...", client.events().update(id, &changes))
        .await?;

    ctx.emit(&response, || {
        Status::success(response.base.message.as_deref().unwrap_or("Event updated"));
        if let Some(event) = &response.event {
            print_event(event);
        }
    })
}

async fn delete(ctx: &Context, id: i64, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!("Delete event {id}?"))? {
        return Err(ApiError::validation(format!(
            "Not deleting event {id}; pass --yes to confirm"
        ))
        .into());
    }

    let client = ctx.client()?;
    let response = ctx
        .track("Deleting event...", client.events().delete(id))
        .await?;

    ctx.emit(&response, || {
        Status::success(response.base.message.as_deref().unwrap_or("Event deleted"));
    })
}
