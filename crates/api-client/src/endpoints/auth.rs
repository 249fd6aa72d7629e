//! Authentication endpoints
//!
//! Sign-up, login and the OTP password-reset flow are public; profile and
//! password change need a session.

use crate::client::EventManagerClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, ForgotPasswordResponse,
    LoginRequest, MessageResponse, ProfileResponse, RegisterRequest, ResetPasswordRequest,
    TokenRefreshResponse, UserData, VerifyOtpRequest,
};
use crate::validation::Validate;

/// Authentication API interface
#[derive(Clone)]
pub struct AuthApi {
    client: EventManagerClient,
}

impl AuthApi {
    /// Create a new auth API interface
    pub(crate) fn new(client: EventManagerClient) -> Self {
        Self { client }
    }

    /// Create an account
    ///
    /// POST auth/register/
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        request.validate()?;
        self.client.post_public("auth/register/", request).await
    }

    /// Log in and store the tokens and user in the session
    ///
    /// POST auth/login/
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        request.validate()?;
        let response: AuthResponse = self.client.post_public("auth/login/", request).await?;

        match (&response.tokens, &response.user) {
            (Some(tokens), Some(user)) => {
                self.client.session().save_login(tokens, user)?;
                Ok(response)
            }
            _ => Err(ApiError::Rejected(
                "Login response did not include tokens".to_string(),
            )),
        }
    }

    /// Forget the local session; the server keeps no login state
    pub fn logout(&self) -> ApiResult<()> {
        self.client.session().logout()?;
        Ok(())
    }

    /// Email a password-reset code
    ///
    /// POST auth/forgot-password/
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> ApiResult<ForgotPasswordResponse> {
        request.validate()?;
        self.client
            .post_public("auth/forgot-password/", request)
            .await
    }

    /// Check a password-reset code
    ///
    /// POST auth/verify-otp/
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> ApiResult<MessageResponse> {
        request.validate()?;
        self.client.post_public("auth/verify-otp/", request).await
    }

    /// Set a new password with a reset code
    ///
    /// POST auth/reset-password/
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> ApiResult<MessageResponse> {
        request.validate()?;
        self.client
            .post_public("auth/reset-password/", request)
            .await
    }

    /// Fetch the logged-in user and refresh the stored copy
    ///
    /// GET auth/profile/
    pub async fn profile(&self) -> ApiResult<ProfileResponse> {
        let response: ProfileResponse = self.client.get("auth/profile/").await?;
        if let Some(ref user) = response.user {
            self.client.session().update_user(user)?;
        }
        Ok(response)
    }

    /// Change the logged-in user's password
    ///
    /// POST auth/change-password/
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ApiResult<MessageResponse> {
        request.validate()?;
        self.client.post("auth/change-password/", request).await
    }

    /// Exchange the refresh token for a new access token
    ///
    /// POST auth/token/refresh/
    pub async fn refresh(&self) -> ApiResult<TokenRefreshResponse> {
        self.client.refresh_access_token().await
    }

    /// The user stored in the session, without a network call
    #[must_use]
    pub fn current_user(&self) -> Option<UserData> {
        self.client.session().current_user()
    }
}
