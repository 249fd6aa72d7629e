//! Dashboard endpoints

use crate::client::EventManagerClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{AdminDashboardResponse, DashboardResponse};

/// Dashboard API interface
#[derive(Clone)]
pub struct DashboardApi {
    client: EventManagerClient,
}

impl DashboardApi {
    /// Create a new dashboard API interface
    pub(crate) fn new(client: EventManagerClient) -> Self {
        Self { client }
    }

    /// Counters for the current user; admins also get site totals
    ///
    /// GET dashboard/
    pub async fn user(&self) -> ApiResult<DashboardResponse> {
        self.client.get("dashboard/").await
    }

    /// Full admin overview with every registration
    ///
    /// GET admin/dashboard/
    pub async fn admin(&self) -> ApiResult<AdminDashboardResponse> {
        let session = self.client.session();
        if session.is_logged_in() && !session.is_admin() {
            return Err(ApiError::PermissionDenied(
                "Only admins can access this dashboard".to_string(),
            ));
        }
        self.client.get("admin/dashboard/").await
    }
}
