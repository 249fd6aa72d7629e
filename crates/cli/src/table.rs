//! Aligned plain-text tables

use crate::output::{format_event_date, format_event_time, format_timestamp};
use console::{measure_text_width, pad_str, truncate_str, Alignment};
use eventmanager_api_client::models::{EventData, RegistrationData, ReminderData};

const MAX_CELL_WIDTH: usize = 32;
const COLUMN_GAP: &str = "  ";

/// A table of text cells with a header row
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given column headers
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; long cells are shortened with an ellipsis
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row = cells
            .into_iter()
            .map(|c| truncate_str(&c.into(), MAX_CELL_WIDTH, "…").into_owned())
            .collect();
        self.rows.push(row);
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render with every column padded to its widest cell
    #[must_use]
    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let width = measure_text_width(cell);
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }

        let line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| pad_str(cell, width, Alignment::Left, None).into_owned())
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        };

        let mut out = line(&self.headers);
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        out.push_str(&rule.join(COLUMN_GAP));
        for row in &self.rows {
            out.push('\n');
            out.push_str(&line(row));
        }
        out
    }
}

/// Events as a table, or a friendly line when there are none
#[must_use]
pub fn events_table(events: &[EventData]) -> String {
    if events.is_empty() {
        return "No events found".to_string();
    }

    let mut table = Table::new(["ID", "TITLE", "DATE", "TIME", "LOCATION", "CATEGORY", "SEATS"]);
    for event in events {
        let seats = if event.is_full {
            "full".to_string()
        } else {
            format!("{}/{}", event.seats_left(), event.max_participants)
        };
        let title = if event.is_registered {
            format!("{} *", event.title)
        } else {
            event.title.clone()
        };
        table.push_row([
            event.id.to_string(),
            title,
            format_event_date(&event.date),
            format_event_time(&event.time),
            event.location.clone(),
            event.category.display_name().to_string(),
            seats,
        ]);
    }
    table.render()
}

/// The user's registrations as a table
#[must_use]
pub fn registrations_table(registrations: &[RegistrationData]) -> String {
    if registrations.is_empty() {
        return "No registrations found".to_string();
    }

    let mut table = Table::new(["EVENT", "TITLE", "DATE", "TIME", "LOCATION", "REGISTERED"]);
    for registration in registrations {
        table.push_row([
            registration.event.to_string(),
            registration.event_title.clone(),
            format_event_date(&registration.event_date),
            format_event_time(&registration.event_time),
            registration.event_location.clone(),
            registration
                .registered_at
                .as_deref()
                .map_or_else(String::new, format_timestamp),
        ]);
    }
    table.render()
}

/// The user's reminders as a table
#[must_use]
pub fn reminders_table(reminders: &[ReminderData]) -> String {
    if reminders.is_empty() {
        return "No reminders found".to_string();
    }

    let mut table = Table::new(["EVENT", "TITLE", "DATE", "TIME", "REMIND AT"]);
    for reminder in reminders {
        table.push_row([
            reminder.event.to_string(),
            reminder.event_title.clone(),
            format_event_date(&reminder.event_date),
            format_event_time(&reminder.event_time),
            format_timestamp(&reminder.remind_at),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmanager_api_client::models::Category;

    fn event(id: i64, title: &str, registered: i64) -> EventData {
        EventData {
            id,
            title: title.to_string(),
            description: String::new(),
            date: "2025-12-15".to_string(),
            time: "14:00:00".to_string(),
            location: "Main Hall".to_string(),
            category: Category::Seminar,
            created_by: None,
            created_by_name: None,
            max_participants: 50,
            registered_count: registered,
            is_full: registered >= 50,
            is_active: true,
            is_registered: false,
            has_reminder: false,
            created_at: None,
        }
    }

    #[test]
    fn test_columns_are_aligned() {
        let mut table = Table::new(["ID", "NAME"]);
        table.push_row(["1", "Short"]);
        table.push_row(["100", "A longer name"]);
        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "ID   NAME");
        assert_eq!(lines[2], "1    Short");
        assert_eq!(lines[3], "100  A longer name");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_long_cells_truncated() {
        let mut table = Table::new(["TITLE"]);
        table.push_row(["x".repeat(80)]);
        let last = table.render().lines().last().unwrap().to_string();
        assert_eq!(measure_text_width(&last), MAX_CELL_WIDTH);
        assert!(last.ends_with('…'));
    }

    #[test]
    fn test_events_table() {
        let rendered = events_table(&[event(1, "AI Seminar", 10), event(2, "Career Fair", 50)]);
        assert!(rendered.contains("Dec 15, 2025"));
        assert!(rendered.contains("2:00 PM"));
        assert!(rendered.contains("40/50"));
        assert!(rendered.contains("full"));
        assert!(rendered.contains("Seminar"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(events_table(&[]), "No events found");
        assert_eq!(registrations_table(&[]), "No registrations found");
        assert_eq!(reminders_table(&[]), "No reminders found");
    }
}
