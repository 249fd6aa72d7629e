//! Event endpoints
//!
//! Listing and details are open to every logged-in user. Creating,
//! updating and deleting are admin-only and are refused locally for
//! students before any request is made.

use crate::client::EventManagerClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Category, CreateEventRequest, EventData, EventDetailResponse, EventListResponse,
    MessageResponse,
};
use crate::validation::Validate;
use chrono::{DateTime, Utc};

/// Events API interface
#[derive(Clone)]
pub struct EventsApi {
    client: EventManagerClient,
}

impl EventsApi {
    /// Create a new events API interface
    pub(crate) fn new(client: EventManagerClient) -> Self {
        Self { client }
    }

    /// List active events, filtered and sorted locally
    ///
    /// GET events/
    pub async fn list(&self, filter: &EventFilter) -> ApiResult<EventListResponse> {
        let mut response: EventListResponse = self.client.get("events/").await?;
        let offset = self.client.config().event_utc_offset_minutes;
        response.events = filter.apply(std::mem::take(&mut response.events), Utc::now(), offset);
        response.count = response.events.len();
        Ok(response)
    }

    /// Get a single event
    ///
    /// GET events/{id}/
    pub async fn get(&self, id: i64) -> ApiResult<EventData> {
        let response: EventDetailResponse = self.client.get(&format!("events/{id}/")).await?;
        response
            .event
            .ok_or_else(|| ApiError::Rejected(format!("Event {id} was not returned")))
    }

    /// Create an event (admin only)
    ///
    /// POST events/create/
    pub async fn create(&self, event: &CreateEventRequest) -> ApiResult<EventDetailResponse> {
        self.require_admin("create")?;
        event.validate()?;
        self.client.post("events/create/", &event.normalized()).await
    }

    /// Replace every field of an event (admin only)
    ///
    /// PUT events/{id}/update/
    pub async fn replace(
        &self,
        id: i64,
        event: &CreateEventRequest,
    ) -> ApiResult<EventDetailResponse> {
        self.require_admin("update")?;
        event.validate()?;
        self.client
            .put(&format!("events/{id}/update/"), &event.normalized())
            .await
    }

    /// Change some fields of an event, keeping the rest (admin only)
    ///
    /// GET events/{id}/ then PUT events/{id}/update/
    pub async fn update(&self, id: i64, changes: &EventUpdate) -> ApiResult<EventDetailResponse> {
        self.require_admin("update")?;
        let current = self.get(id).await?;
        self.replace(id, &changes.apply_to(&current)).await
    }

    /// Delete an event (admin only)
    ///
    /// DELETE events/{id}/delete/
    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        self.require_admin("delete")?;
        self.client.delete(&format!("events/{id}/delete/")).await
    }

    fn require_admin(&self, action: &str) -> ApiResult<()> {
        let session = self.client.session();
        if !session.is_logged_in() {
            return Err(ApiError::NotAuthenticated);
        }
        if !session.is_admin() {
            return Err(ApiError::PermissionDenied(format!(
                "Only admins can {action} events"
            )));
        }
        Ok(())
    }
}

/// Client-side event list filter
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Only this category
    pub category: Option<Category>,
    /// Case-insensitive text over title, description and location
    pub search: Option<String>,
    /// Drop events that have already started
    pub upcoming_only: bool,
}

impl EventFilter {
    /// Create an empty filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Only upcoming events
    #[must_use]
    pub fn upcoming(mut self) -> Self {
        self.upcoming_only = true;
        self
    }

    /// Filter `events` and sort them by start time, soonest first.
    /// Events with an unreadable date sort last and are never "upcoming".
    #[must_use]
    pub fn apply(
        &self,
        events: Vec<EventData>,
        now: DateTime<Utc>,
        utc_offset_minutes: i32,
    ) -> Vec<EventData> {
        let mut events: Vec<_> = events
            .into_iter()
            .filter(|e| self.category.is_none_or(|c| e.category == c))
            .filter(|e| self.search.as_deref().is_none_or(|s| e.matches_text(s)))
            .filter(|e| {
                !self.upcoming_only
                    || e.starts_at(utc_offset_minutes).is_some_and(|start| start >= now)
            })
            .collect();

        events.sort_by_key(|e| {
            let start = e.starts_at(utc_offset_minutes);
            (start.is_none(), start, e.id)
        });
        events
    }
}

/// Partial event change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub max_participants: Option<i64>,
}

impl EventUpdate {
    /// Whether nothing would change
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.location.is_none()
            && self.category.is_none()
            && self.max_participants.is_none()
    }

    /// Full request body: these changes over `current`
    #[must_use]
    pub fn apply_to(&self, current: &EventData) -> CreateEventRequest {
        let base = CreateEventRequest::from(current);
        CreateEventRequest {
            title: self.title.clone().unwrap_or(base.title),
            description: self.description.clone().unwrap_or(base.description),
            date: self.date.clone().unwrap_or(base.date),
            time: self.time.clone().unwrap_or(base.time),
            location: self.location.clone().unwrap_or(base.location),
            category: self.category.clone().unwrap_or(base.category),
            max_participants: self.max_participants.unwrap_or(base.max_participants),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(id: i64, title: &str, date: &str, time: &str, category: Category) -> EventData {
        EventData {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            date: date.to_string(),
            time: time.to_string(),
            location: "Main Campus".to_string(),
            category,
            created_by: Some(1),
            created_by_name: None,
            max_participants: 50,
            registered_count: 0,
            is_full: false,
            is_active: true,
            is_registered: false,
            has_reminder: false,
            created_at: None,
        }
    }

    fn sample() -> Vec<EventData> {
        vec![
            event(1, "Football Final", "2025-12-20", "16:00:00", Category::Sports),
            event(2, "AI Seminar", "2025-12-10", "10:00:00", Category::Seminar),
            event(3, "Old Workshop", "2025-01-05", "09:00:00", Category::Workshop),
            event(4, "Cricket Trials", "2025-12-10", "08:30:00", Category::Sports),
        ]
    }

    #[test]
    fn test_sorted_by_start() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let ids: Vec<_> = EventFilter::new()
            .apply(sample(), now, 300)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_category_and_search() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let sports = EventFilter::new()
            .with_category(Category::Sports)
            .apply(sample(), now, 300);
        assert_eq!(sports.len(), 2);

        let found = EventFilter::new().with_search("seminar").apply(sample(), now, 300);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_upcoming_respects_event_offset() {
        // 2025-12-10 10:00 at UTC+5 is 05:00 UTC
        let just_before = Utc.with_ymd_and_hms(2025, 12, 10, 4, 59, 0).unwrap();
        let just_after = Utc.with_ymd_and_hms(2025, 12, 10, 5, 1, 0).unwrap();

        let before: Vec<_> = EventFilter::new()
            .upcoming()
            .apply(sample(), just_before, 300)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(before, vec![2, 1]);

        let after: Vec<_> = EventFilter::new()
            .upcoming()
            .apply(sample(), just_after, 300)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(after, vec![1]);
    }

    #[test]
    fn test_unparsable_dates_sort_last() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut events = sample();
        events.push(event(9, "TBA", "", "", Category::Other));
        let sorted = EventFilter::new().apply(events.clone(), now, 300);
        assert_eq!(sorted.last().unwrap().id, 9);

        let upcoming = EventFilter::new().upcoming().apply(events, now, 300);
        assert!(upcoming.iter().all(|e| e.id != 9));
    }

    #[test]
    fn test_update_keeps_unspecified_fields() {
        let current = event(2, "AI Seminar", "2025-12-10", "10:00:00", Category::Seminar);
        let changes = EventUpdate {
            location: Some("Auditorium".to_string()),
            max_participants: Some(200),
            ..EventUpdate::default()
        };
        assert!(!changes.is_empty());

        let request = changes.apply_to(&current);
        assert_eq!(request.title, "AI Seminar");
        assert_eq!(request.location, "Auditorium");
        assert_eq!(request.category, "seminar");
        assert_eq!(request.max_participants, 200);
        assert!(EventUpdate::default().is_empty());
    }
}
