//! Account commands

use super::{password_or_prompt, Context};
use anyhow::Result;
use clap::Subcommand;
use eventmanager_api_client::models::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, Role, UserData, VerifyOtpRequest,
};
use eventmanager_api_client::ApiError;
use eventmanager_cli::output::{capitalize_first, format_timestamp, Status};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// student or admin
        #[arg(long)]
        role: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "EVENTMANAGER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in and remember the session
    Login {
        /// Email address
        #[arg(long)]
        email: String,

        /// student or admin
        #[arg(long, default_value = "student")]
        role: String,

        /// Password (prompted when omitted)
        #[arg(long, env = "EVENTMANAGER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Email a password-reset code
    ForgotPassword {
        /// Email address
        #[arg(long)]
        email: String,
    },

    /// Check a password-reset code
    VerifyOtp {
        /// Email address
        #[arg(long)]
        email: String,

        /// Six-digit code from the email
        #[arg(long)]
        otp: String,
    },

    /// Set a new password with a reset code
    ResetPassword {
        /// Email address
        #[arg(long)]
        email: String,

        /// Six-digit code from the email
        #[arg(long)]
        otp: String,

        /// New password (prompted when omitted)
        #[arg(long, env = "EVENTMANAGER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Change your password
    ChangePassword {
        /// Current password (prompted when omitted)
        #[arg(long)]
        old_password: Option<String>,

        /// New password (prompted when omitted)
        #[arg(long)]
        new_password: Option<String>,
    },
}

pub async fn run(action: AuthAction, ctx: &Context) -> Result<()> {
    match action {
        AuthAction::Register {
            name,
            email,
            role,
            password,
        } => register(ctx, name, email, role, password).await,
        AuthAction::Login {
            email,
            role,
            password,
        } => login(ctx, email, &role, password).await,
        AuthAction::Logout => logout(ctx),
        AuthAction::Whoami => whoami(ctx).await,
        AuthAction::ForgotPassword { email } => forgot_password(ctx, email).await,
        AuthAction::VerifyOtp { email, otp } => verify_otp(ctx, email, otp).await,
        AuthAction::ResetPassword {
            email,
            otp,
            password,
        } => reset_password(ctx, email, otp, password).await,
        AuthAction::ChangePassword {
            old_password,
            new_password,
        } => change_password(ctx, old_password, new_password).await,
    }
}

/// A new password and its confirmation; a password given on the command
/// line confirms itself
fn new_password(given: Option<String>, prompt: &str, flag: &str) -> Result<(String, String)> {
    if let Some(password) = given {
        return Ok((password.clone(), password));
    }
    let password = password_or_prompt(None, prompt, flag)?;
    let confirm = password_or_prompt(None, "Confirm password", flag)?;
    Ok((password, confirm))
}

fn print_user(user: &UserData) {
    Status::field("Name", &user.name);
    Status::field("Email", &user.email);
    Status::field("Role", &capitalize_first(user.role.as_str()));
    if let Some(created) = &user.created_at {
        Status::field("Member since", &format_timestamp(created));
    }
}

async fn register(
    ctx: &Context,
    name: String,
    email: String,
    role: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let role = role.map(|r| r.parse::<Role>()).transpose()?;
    let (password, confirm_password) = new_password(password, "Password", "--password")?;
    let request = RegisterRequest {
        email,
        name,
        password,
        confirm_password,
        role,
    };

    let client = ctx.client()?;
    let response = ctx
        .track("Creating account...", client.auth().register(&request))
        .await?;

    let summary = serde_json::json!({
        "message": response.base.message,
        "user": response.user,
    });
    ctx.emit(&summary, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Account created"),
        );
        Status::info(&format!(
            "Log in with: eventmanager auth login --email {}",
            request.email
        ));
    })
}

async fn login(ctx: &Context, email: String, role: &str, password: Option<String>) -> Result<()> {
    let role: Role = role.parse()?;
    let password = password_or_prompt(password, "Password", "--password")?;
    let request = LoginRequest {
        email,
        password,
        role,
    };

    let client = ctx.client()?;
    let response = ctx.track("Logging in...", client.auth().login(&request)).await?;

    // Tokens stay in the session file, never on stdout
    let summary = serde_json::json!({
        "message": response.base.message,
        "user": response.user,
    });
    ctx.emit(&summary, || {
        if let Some(user) = &response.user {
            Status::success(&format!(
                "Logged in as {} ({})",
                user.name,
                capitalize_first(user.role.as_str())
            ));
        }
    })
}

fn logout(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let was_logged_in = client.session().is_logged_in();
    client.auth().logout()?;

    ctx.emit(&serde_json::json!({ "logged_out": was_logged_in }), || {
        if was_logged_in {
            Status::success("Logged out");
        } else {
            Status::info("Not logged in");
        }
    })
}

async fn whoami(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let response = ctx.track("Loading profile...", client.auth().profile()).await?;
    let user = response
        .user
        .clone()
        .ok_or_else(|| ApiError::Rejected("Profile response did not include a user".to_string()))?;

    ctx.emit(&response, || {
        Status::header("Profile");
        print_user(&user);
    })
}

async fn forgot_password(ctx: &Context, email: String) -> Result<()> {
    let client = ctx.client()?;
    let request = ForgotPasswordRequest { email };
    let response = ctx
        .track("Requesting reset code...", client.auth().forgot_password(&request))
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("A reset code was sent to your email"),
        );
        if let Some(otp) = &response.otp {
            Status::info(&format!("Reset code: {otp}"));
        }
    })
}

async fn verify_otp(ctx: &Context, email: String, otp: String) -> Result<()> {
    let client = ctx.client()?;
    let response = client
        .auth()
        .verify_otp(&VerifyOtpRequest { email, otp })
        .await?;

    ctx.emit(&response, || {
        Status::success(response.base.message.as_deref().unwrap_or("Code verified"));
    })
}

async fn reset_password(
    ctx: &Context,
    email: String,
    otp: String,
    password: Option<String>,
) -> Result<()> {
    let (new_password, confirm_password) = new_password(password, "New password", "--password")?;
    let request = ResetPasswordRequest {
        email,
        otp,
        new_password,
        confirm_password,
    };

    let client = ctx.client()?;
    let response = ctx
        .track("Resetting password...", client.auth().reset_password(&request))
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Password reset"),
        );
    })
}

async fn change_password(
    ctx: &Context,
    old_password: Option<String>,
    new: Option<String>,
) -> Result<()> {
    let client = ctx.client()?;
    if !client.session().is_logged_in() {
        return Err(ApiError::NotAuthenticated.into());
    }

    let old_password = password_or_prompt(old_password, "Current password", "--old-password")?;
    let (new_password, confirm_password) = new_password(new, "New password", "--new-password")?;
    let request = ChangePasswordRequest {
        old_password,
        new_password,
        confirm_password,
    };

    let response = ctx
        .track("Changing password...", client.auth().change_password(&request))
        .await?;

    ctx.emit(&response, || {
        Status::success(
            response
                .base
                .message
                .as_deref()
                .unwrap_or("Password changed"),
        );
    })
}
