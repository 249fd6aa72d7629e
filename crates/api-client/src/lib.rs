//! Typed async client for the Event Manager REST API
//!
//! This crate provides a resilient HTTP client for the university Event
//! Manager backend: authentication, events, registrations, reminders and
//! dashboards.
//!
//! # Features
//!
//! - **Session persistence**: JWT pair and user stored in a private JSON file
//! - **Auth header injection**: `Authorization: Bearer` on every authenticated call
//! - **Token refresh**: one transparent refresh-and-replay on 401
//! - **Retry with exponential backoff**: Automatic retry for transient failures
//! - **Circuit breaker**: Stop calling a server that keeps failing
//! - **Local validation**: Forms are checked before anything is sent
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use eventmanager_api_client::{ClientConfig, EventManagerClient};
//! use eventmanager_api_client::endpoints::EventFilter;
//! use eventmanager_api_client::models::{LoginRequest, Role};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EventManagerClient::with_config(ClientConfig::default())?;
//!
//!     client
//!         .auth()
//!         .login(&LoginRequest {
//!             email: "student@uni.edu".to_string(),
//!             password: "secret1".to_string(),
//!             role: Role::Student,
//!         })
//!         .await?;
//!
//!     let events = client.events().list(&EventFilter::new().upcoming()).await?;
//!     println!("{} upcoming events", events.count);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod models;
pub mod session;
pub mod validation;

pub use client::EventManagerClient;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use session::SessionStore;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::EventManagerClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        AuthApi, DashboardApi, EventFilter, EventUpdate, EventsApi, RegistrationsApi,
        ReminderPlan, RemindersApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::{Category, ReminderTiming, Role};
    pub use crate::session::SessionStore;
    pub use crate::validation::Validate;
}
