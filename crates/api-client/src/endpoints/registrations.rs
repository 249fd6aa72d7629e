//! Event registration endpoints

use crate::client::EventManagerClient;
use crate::error::ApiResult;
use crate::models::{
    EventRegistrationRequest, MessageResponse, MyRegistrationsResponse, RegistrationResponse,
};
use crate::validation::Validate;

/// Registrations API interface
#[derive(Clone)]
pub struct RegistrationsApi {
    client: EventManagerClient,
}

impl RegistrationsApi {
    /// Create a new registrations API interface
    pub(crate) fn new(client: EventManagerClient) -> Self {
        Self { client }
    }

    /// Register the current user for an event
    ///
    /// POST events/{id}/register/
    pub async fn register(
        &self,
        event_id: i64,
        details: &EventRegistrationRequest,
    ) -> ApiResult<RegistrationResponse> {
        details.validate()?;
        self.client
            .post(&format!("events/{event_id}/register/"), details)
            .await
    }

    /// Cancel the current user's registration
    ///
    /// DELETE events/{id}/cancel-registration/
    pub async fn cancel(&self, event_id: i64) -> ApiResult<MessageResponse> {
        self.client
            .delete(&format!("events/{event_id}/cancel-registration/"))
            .await
    }

    /// The current user's registrations
    ///
    /// GET registrations/
    pub async fn mine(&self) -> ApiResult<MyRegistrationsResponse> {
        self.client.get("registrations/").await
    }
}
