//! Wire types for the Event Manager REST API
//!
//! Every response carries the same envelope (`success`, `message`,
//! `errors`), flattened into the typed response structs.

use crate::error::ApiError;
use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use eventmanager_core::validation::{parse_date, parse_time};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enumerations
// ============================================================================

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Can create, update and delete events
    Admin,
    /// Regular user
    #[default]
    Student,
}

impl Role {
    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }

    /// Whether this role may manage events
    #[must_use]
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("admin") {
            Ok(Self::Admin)
        } else if s.eq_ignore_ascii_case("student") {
            Ok(Self::Student)
        } else {
            Err(ApiError::validation(format!(
                "Invalid role '{s}'. Valid roles: admin, student"
            )))
        }
    }
}

/// Event category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Academic,
    Cultural,
    Sports,
    Workshop,
    Seminar,
    #[default]
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Self::Academic,
        Self::Cultural,
        Self::Sports,
        Self::Workshop,
        Self::Seminar,
        Self::Other,
    ];

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Academic => "academic",
            Self::Cultural => "cultural",
            Self::Sports => "sports",
            Self::Workshop => "workshop",
            Self::Seminar => "seminar",
            Self::Other => "other",
        }
    }

    /// Name shown to users
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Cultural => "Cultural",
            Self::Sports => "Sports",
            Self::Workshop => "Workshop",
            Self::Seminar => "Seminar",
            Self::Other => "Other",
        }
    }

    /// Wire names of every category
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ApiError::validation(format!(
                    "Invalid category '{s}'. Valid categories: {}",
                    Self::names().join(", ")
                ))
            })
    }
}

/// How long before an event a reminder fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReminderTiming {
    #[default]
    OneDay,
    TwelveHours,
    SixHours,
    ThreeHours,
    OneHour,
    ThirtyMinutes,
    FifteenMinutes,
}

impl ReminderTiming {
    /// All timings, longest lead first
    pub const ALL: [ReminderTiming; 7] = [
        Self::OneDay,
        Self::TwelveHours,
        Self::SixHours,
        Self::ThreeHours,
        Self::OneHour,
        Self::ThirtyMinutes,
        Self::FifteenMinutes,
    ];

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1_day",
            Self::TwelveHours => "12_hours",
            Self::SixHours => "6_hours",
            Self::ThreeHours => "3_hours",
            Self::OneHour => "1_hour",
            Self::ThirtyMinutes => "30_minutes",
            Self::FifteenMinutes => "15_minutes",
        }
    }

    /// Human label, e.g. "3 Hours Before"
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OneDay => "1 Day Before",
            Self::TwelveHours => "12 Hours Before",
            Self::SixHours => "6 Hours Before",
            Self::ThreeHours => "3 Hours Before",
            Self::OneHour => "1 Hour Before",
            Self::ThirtyMinutes => "30 Minutes Before",
            Self::FifteenMinutes => "15 Minutes Before",
        }
    }

    /// Time between the reminder and the event start
    #[must_use]
    pub fn lead_time(self) -> Duration {
        match self {
            Self::OneDay => Duration::days(1),
            Self::TwelveHours => Duration::hours(12),
            Self::SixHours => Duration::hours(6),
            Self::ThreeHours => Duration::hours(3),
            Self::OneHour => Duration::hours(1),
            Self::ThirtyMinutes => Duration::minutes(30),
            Self::FifteenMinutes => Duration::minutes(15),
        }
    }
}

impl fmt::Display for ReminderTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderTiming {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let valid: Vec<_> = Self::ALL.iter().map(|t| t.as_str()).collect();
                ApiError::validation(format!(
                    "Invalid timing '{s}'. Valid timings: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Serialize and deserialize the string enums through their wire names
macro_rules! string_enum_serde {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    )*};
}

string_enum_serde!(Role, Category, ReminderTiming);

// ============================================================================
// Envelope
// ============================================================================

/// Fields shared by every API response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseResponse {
    /// Whether the server performed the action
    #[serde(default)]
    pub success: bool,
    /// Human-readable outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field errors: `{ field: [messages] }`, `{ field: message }` or a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl BaseResponse {
    /// Message followed by any field errors
    #[must_use]
    pub fn error_summary(&self) -> String {
        let mut summary = self.message.clone().unwrap_or_default();
        let details = self.errors.as_ref().map(flatten_errors).unwrap_or_default();
        if !details.is_empty() {
            if !summary.is_empty() {
                summary.push_str(": ");
            }
            summary.push_str(&details.join("; "));
        }
        summary
    }
}

/// Render a DRF-style error structure as `field: message` pairs
#[must_use]
pub fn flatten_errors(errors: &serde_json::Value) -> Vec<String> {
    fn messages(value: &serde_json::Value) -> Vec<String> {
        match value {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(items) => items.iter().flat_map(messages).collect(),
            serde_json::Value::Null => Vec::new(),
            other => vec![other.to_string()],
        }
    }

    match errors {
        serde_json::Value::Object(map) => map
            .iter()
            .flat_map(|(field, value)| {
                messages(value).into_iter().map(move |msg| {
                    if field == "non_field_errors" {
                        msg
                    } else {
                        format!("{field}: {msg}")
                    }
                })
            })
            .collect(),
        other => messages(other),
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Account as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserData {
    /// Whether the user is an admin
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// JWT pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub access: String,
    pub refresh: String,
}

/// Event as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventData {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS`
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub max_participants: i64,
    #[serde(default)]
    pub registered_count: i64,
    #[serde(default)]
    pub is_full: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_registered: bool,
    #[serde(default)]
    pub has_reminder: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl EventData {
    /// Remaining places, never negative
    #[must_use]
    pub fn seats_left(&self) -> i64 {
        (self.max_participants - self.registered_count).max(0)
    }

    /// Start instant, reading `date` and `time` as wall-clock time at
    /// `utc_offset_minutes` east of UTC
    #[must_use]
    pub fn starts_at(&self, utc_offset_minutes: i32) -> Option<DateTime<FixedOffset>> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;
        let offset = FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?)?;
        offset.from_local_datetime(&date.and_time(time)).single()
    }

    /// Case-insensitive match over title, description and location
    #[must_use]
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.location.to_lowercase().contains(&needle)
    }
}

/// A user's registration for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationData {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    pub event: i64,
    #[serde(default)]
    pub event_title: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_location: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub registered_at: Option<String>,
}

/// A pending reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderData {
    pub id: i64,
    #[serde(default)]
    pub user: Option<i64>,
    pub event: i64,
    #[serde(default)]
    pub event_title: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_location: Option<String>,
    #[serde(default)]
    pub event_category: Option<String>,
    /// ISO-8601 instant
    pub remind_at: String,
    #[serde(default)]
    pub is_sent: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// Register and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub user: Option<UserData>,
    #[serde(default)]
    pub tokens: Option<TokenData>,
}

/// Forgot-password response; debug backends echo the OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
}

/// Profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub user: Option<UserData>,
}

/// Event list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventListResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub events: Vec<EventData>,
}

/// Single event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub event: Option<EventData>,
}

/// Registration created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub registration: Option<RegistrationData>,
}

/// The current user's registrations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyRegistrationsResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub registrations: Vec<RegistrationData>,
}

/// Reminder created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub reminder: Option<ReminderData>,
}

/// The current user's pending reminders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyRemindersResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub reminders: Vec<ReminderData>,
}

/// Response with only the envelope (cancel, delete, password flows)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
}

/// Token refresh response; `refresh` is present when tokens rotate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Per-user dashboard counters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub my_registrations: u64,
    #[serde(default)]
    pub my_reminders: u64,
    /// Admins only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_created: Option<u64>,
    /// Admins only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
}

/// Dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub user: Option<UserData>,
}

/// Site-wide counters for admins
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_students: u64,
    pub total_admins: u64,
    pub total_events: u64,
    pub active_events: u64,
    pub total_registrations: u64,
    /// Last seven days
    pub recent_registrations: u64,
    /// Last seven days
    pub recent_events: u64,
}

/// Registration row in the admin dashboard. Rows grouped by event carry
/// the user fields; rows grouped by user carry the event fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminRegistration {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_location: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub student_id: Option<String>,
    pub registered_at: Option<String>,
}

/// An event with everyone registered for it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRegistrationDetail {
    pub event_id: i64,
    pub event_title: String,
    pub event_date: String,
    pub event_time: String,
    pub event_location: String,
    pub event_category: String,
    pub registration_count: u64,
    pub max_participants: i64,
    pub is_full: bool,
    pub is_active: bool,
    pub registrations: Vec<AdminRegistration>,
}

/// A user with every event they registered for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRegistrationDetail {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub user_role: Role,
    pub registration_count: u64,
    pub registrations: Vec<AdminRegistration>,
}

/// Most-registered event entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TopEvent {
    pub event_id: i64,
    pub event_title: String,
    pub event_date: String,
    pub registration_count: u64,
}

/// Admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboardResponse {
    #[serde(flatten)]
    pub base: BaseResponse,
    #[serde(default)]
    pub stats: AdminStats,
    #[serde(default)]
    pub event_registration_details: Vec<EventRegistrationDetail>,
    #[serde(default)]
    pub user_registration_details: Vec<UserRegistrationDetail>,
    #[serde(default)]
    pub top_events: Vec<TopEvent>,
}

// ============================================================================
// Requests
// ============================================================================

/// Sign-up form
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Login form
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Request a password-reset OTP
#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Check an OTP
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Set a new password with an OTP
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Change the password of the logged-in user
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// New or replacement event fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`
    pub time: String,
    pub location: String,
    /// Category wire name; normalised to lowercase before sending
    pub category: String,
    pub max_participants: i64,
}

/// Default capacity of a new event
pub const DEFAULT_MAX_PARTICIPANTS: i64 = 100;

impl Default for CreateEventRequest {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            location: String::new(),
            category: Category::default().as_str().to_string(),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
        }
    }
}

impl From<&EventData> for CreateEventRequest {
    fn from(event: &EventData) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            category: event.category.as_str().to_string(),
            max_participants: event.max_participants,
        }
    }
}

/// Attendee details for an event registration
#[derive(Debug, Clone, Serialize)]
pub struct EventRegistrationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
}

/// Reminder timing choice
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SetReminderRequest {
    pub timing: ReminderTiming,
}

/// Token refresh body
#[derive(Debug, Clone, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Robotics Workshop",
            "description": "Build a line follower",
            "date": "2025-12-15",
            "time": "14:00:00",
            "location": "Lab 3",
            "category": "workshop",
            "created_by": 1,
            "created_by_name": "Dr. Khan",
            "max_participants": 30,
            "registered_count": 12,
            "is_full": false,
            "is_active": true,
            "is_registered": true,
            "has_reminder": false,
            "created_at": "2025-11-01T10:00:00Z"
        }"#
    }

    #[test]
    fn test_event_deserialize() {
        let event: EventData = serde_json::from_str(event_json()).unwrap();
        assert_eq!(event.id, 7);
        assert_eq!(event.category, Category::Workshop);
        assert_eq!(event.seats_left(), 18);
        assert!(event.is_registered);
    }

    #[test]
    fn test_starts_at_uses_offset() {
        let event: EventData = serde_json::from_str(event_json()).unwrap();
        let start = event.starts_at(300).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-12-15T14:00:00+05:00");
        assert_eq!(start.naive_utc().to_string(), "2025-12-15 09:00:00");
    }

    #[test]
    fn test_starts_at_bad_date() {
        let mut event: EventData = serde_json::from_str(event_json()).unwrap();
        event.date = "soon".to_string();
        assert!(event.starts_at(300).is_none());
    }

    #[test]
    fn test_seats_left_never_negative() {
        let mut event: EventData = serde_json::from_str(event_json()).unwrap();
        event.registered_count = 40;
        assert_eq!(event.seats_left(), 0);
    }

    #[test]
    fn test_matches_text() {
        let event: EventData = serde_json::from_str(event_json()).unwrap();
        assert!(event.matches_text("robotics"));
        assert!(event.matches_text("LAB"));
        assert!(event.matches_text("follower"));
        assert!(!event.matches_text("concert"));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(" Sports ".parse::<Category>().unwrap(), Category::Sports);
        assert_eq!("SEMINAR".parse::<Category>().unwrap(), Category::Seminar);
        let err = "music".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("academic, cultural, sports, workshop, seminar, other"));
        assert_eq!(Category::Cultural.display_name(), "Cultural");
    }

    #[test]
    fn test_role_case_insensitive() {
        let user: UserData =
            serde_json::from_str(r#"{"id":1,"email":"a@b.co","name":"A","role":"Admin"}"#).unwrap();
        assert!(user.is_admin());
        assert_eq!(serde_json::to_value(user.role).unwrap(), "admin");
    }

    #[test]
    fn test_reminder_timing() {
        let timing: ReminderTiming = "3_hours".parse().unwrap();
        assert_eq!(timing, ReminderTiming::ThreeHours);
        assert_eq!(timing.lead_time(), Duration::hours(3));
        assert_eq!(timing.label(), "3 Hours Before");
        assert_eq!(
            serde_json::to_string(&SetReminderRequest::default()).unwrap(),
            r#"{"timing":"1_day"}"#
        );
        assert!("2_days".parse::<ReminderTiming>().is_err());
    }

    #[test]
    fn test_error_summary() {
        let base: BaseResponse = serde_json::from_str(
            r#"{
                "success": false,
                "message": "Registration failed",
                "errors": {
                    "email": ["user with this email already exists."],
                    "confirm_password": "Passwords do not match"
                }
            }"#,
        )
        .unwrap();
        let summary = base.error_summary();
        assert!(summary.starts_with("Registration failed: "));
        assert!(summary.contains("email: user with this email already exists."));
        assert!(summary.contains("confirm_password: Passwords do not match"));
    }

    #[test]
    fn test_non_field_errors_unprefixed() {
        let errors = serde_json::json!({"non_field_errors": ["Invalid email or password"]});
        assert_eq!(flatten_errors(&errors), vec!["Invalid email or password".to_string()]);
    }

    #[test]
    fn test_admin_dashboard_deserialize() {
        let json = r#"{
            "success": true,
            "stats": {"total_users": 10, "total_students": 8, "total_admins": 2,
                      "total_events": 4, "active_events": 3, "total_registrations": 9,
                      "recent_registrations": 2, "recent_events": 1},
            "event_registration_details": [{
                "event_id": 1, "event_title": "Hackathon", "event_date": "2025-12-01",
                "event_time": "09:00:00", "event_location": "Hall A", "event_category": "Academic",
                "registration_count": 1, "max_participants": 50,
                "is_full": false, "is_active": true,
                "registrations": [{
                    "id": 3, "user_id": 5, "user_name": "Sara", "user_email": "s@u.edu",
                    "name": "Sara", "email": "s@u.edu", "phone": "0300", "student_id": "F21-1",
                    "registered_at": null
                }]
            }],
            "user_registration_details": [],
            "top_events": [{
                "event_id": 1, "event_title": "Hackathon",
                "event_date": "2025-12-01", "registration_count": 1
            }]
        }"#;
        let dashboard: AdminDashboardResponse = serde_json::from_str(json).unwrap();
        assert!(dashboard.base.success);
        assert_eq!(dashboard.stats.total_students, 8);
        assert_eq!(dashboard.event_registration_details[0].registrations[0].user_id, Some(5));
        assert_eq!(dashboard.top_events.len(), 1);
    }

    #[test]
    fn test_update_from_event_keeps_fields() {
        let event: EventData = serde_json::from_str(event_json()).unwrap();
        let request = CreateEventRequest::from(&event);
        assert_eq!(request.category, "workshop");
        assert_eq!(request.max_participants, 30);
    }
}
