//! Reminder endpoints
//!
//! The server stores `remind_at` and sends the reminder email. The local
//! [`RemindersApi::plan`] mirrors its arithmetic so a reminder that would
//! already be due can be reported before asking.

use crate::client::EventManagerClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    EventData, MessageResponse, MyRemindersResponse, ReminderResponse, ReminderTiming,
    SetReminderRequest,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// Reminders API interface
#[derive(Clone)]
pub struct RemindersApi {
    client: EventManagerClient,
}

impl RemindersApi {
    /// Create a new reminders API interface
    pub(crate) fn new(client: EventManagerClient) -> Self {
        Self { client }
    }

    /// Ask to be reminded `timing` before an event
    ///
    /// POST events/{id}/set-reminder/
    pub async fn set(&self, event_id: i64, timing: ReminderTiming) -> ApiResult<ReminderResponse> {
        self.client
            .post(
                &format!("events/{event_id}/set-reminder/"),
                &SetReminderRequest { timing },
            )
            .await
    }

    /// Cancel a reminder
    ///
    /// DELETE events/{id}/cancel-reminder/
    pub async fn cancel(&self, event_id: i64) -> ApiResult<MessageResponse> {
        self.client
            .delete(&format!("events/{event_id}/cancel-reminder/"))
            .await
    }

    /// The current user's unsent reminders
    ///
    /// GET reminders/
    pub async fn mine(&self) -> ApiResult<MyRemindersResponse> {
        self.client.get("reminders/").await
    }

    /// When a reminder for `event` would fire, using the configured event offset
    pub fn plan(
        &self,
        event: &EventData,
        timing: ReminderTiming,
        now: DateTime<Utc>,
    ) -> ApiResult<ReminderPlan> {
        ReminderPlan::compute(event, timing, now, self.client.config().event_utc_offset_minutes)
    }
}

/// Locally computed reminder schedule
#[derive(Debug, Clone, Serialize)]
pub struct ReminderPlan {
    /// Chosen lead time
    pub timing: ReminderTiming,
    /// Event start in the event's own offset
    pub event_starts_at: DateTime<FixedOffset>,
    /// When the reminder fires
    pub remind_at: DateTime<FixedOffset>,
    /// The server refuses reminders that are already due
    pub in_past: bool,
}

impl ReminderPlan {
    /// Compute the schedule for `event` with dates at `utc_offset_minutes`
    pub fn compute(
        event: &EventData,
        timing: ReminderTiming,
        now: DateTime<Utc>,
        utc_offset_minutes: i32,
    ) -> ApiResult<Self> {
        let event_starts_at = event.starts_at(utc_offset_minutes).ok_or_else(|| {
            ApiError::validation(format!(
                "Event {} has an unreadable date/time: {} {}",
                event.id, event.date, event.time
            ))
        })?;
        let remind_at = event_starts_at - timing.lead_time();

        Ok(Self {
            timing,
            event_starts_at,
            remind_at,
            in_past: remind_at <= now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::TimeZone;

    fn event(date: &str, time: &str) -> EventData {
        EventData {
            id: 5,
            title: "Hackathon".to_string(),
            description: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            location: "Lab".to_string(),
            category: Category::Academic,
            created_by: None,
            created_by_name: None,
            max_participants: 100,
            registered_count: 0,
            is_full: false,
            is_active: true,
            is_registered: true,
            has_reminder: false,
            created_at: None,
        }
    }

    #[test]
    fn test_plan_subtracts_lead_time() {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let event = event("2025-12-15", "23:40:00");
        let plan = ReminderPlan::compute(&event, ReminderTiming::OneHour, now, 300).unwrap();
        assert_eq!(plan.remind_at.to_rfc3339(), "2025-12-15T22:40:00+05:00");
        assert_eq!(plan.remind_at.naive_utc().to_string(), "2025-12-15 17:40:00");
        assert!(!plan.in_past);
    }

    #[test]
    fn test_plan_in_past() {
        // Event at 12:00 UTC+5 (07:00 UTC); a 1-day reminder fired the day before
        let now = Utc.with_ymd_and_hms(2025, 12, 15, 6, 0, 0).unwrap();
        let event = event("2025-12-15", "12:00");
        let plan = ReminderPlan::compute(&event, ReminderTiming::OneDay, now, 300).unwrap();
        assert!(plan.in_past);

        let plan =
            ReminderPlan::compute(&event, ReminderTiming::FifteenMinutes, now, 300).unwrap();
        assert!(!plan.in_past);
    }

    #[test]
    fn test_plan_bad_date() {
        let now = Utc::now();
        let event = event("tomorrow", "noon");
        let err = ReminderPlan::compute(&event, ReminderTiming::OneDay, now, 300).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
