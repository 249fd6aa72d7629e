//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one area of the REST API.
//! Paths are relative to the configured base URL.
//!
//! | Module | Paths |
//! |--------|-------|
//! | `auth` | `auth/register/`, `auth/login/`, `auth/forgot-password/`, `auth/verify-otp/`, `auth/reset-password/`, `auth/change-password/`, `auth/profile/`, `auth/token/refresh/` |
//! | `events` | `events/`, `events/create/`, `events/{id}/`, `events/{id}/update/`, `events/{id}/delete/` |
//! | `registrations` | `events/{id}/register/`, `events/{id}/cancel-registration/`, `registrations/` |
//! | `reminders` | `events/{id}/set-reminder/`, `events/{id}/cancel-reminder/`, `reminders/` |
//! | `dashboard` | `dashboard/`, `admin/dashboard/` |

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod registrations;
pub mod reminders;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use events::{EventFilter, EventUpdate, EventsApi};
pub use registrations::RegistrationsApi;
pub use reminders::{ReminderPlan, RemindersApi};
