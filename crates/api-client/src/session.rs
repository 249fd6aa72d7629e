//! Login session persistence
//!
//! The session (JWT pair plus the logged-in user) lives in a small JSON
//! file so consecutive CLI invocations stay logged in. A store without a
//! path keeps everything in memory.

use crate::models::{Role, TokenData, UserData};
use chrono::{DateTime, Utc};
use eventmanager_core::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Persisted session contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// The logged-in user
    pub user: UserData,
    /// When the login happened
    pub logged_in_at: DateTime<Utc>,
}

/// Thread-safe session store, optionally backed by a file
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    data: RwLock<Option<SessionData>>,
}

impl SessionStore {
    /// Store that never touches the filesystem
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(None),
        }
    }

    /// Open the store at `path`, loading an existing session if present.
    /// An unreadable session file is treated as logged out.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionData>(&content) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Ignoring corrupted session file"
                    );
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(Error::new(
                    ErrorCode::SessionError,
                    format!("Failed to read session file {}: {e}", path.display()),
                ));
            }
        };

        tracing::debug!(path = %path.display(), logged_in = data.is_some(), "Session loaded");

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Backing file, if any
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Snapshot of the current session
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Record a successful login
    pub fn save_login(&self, tokens: &TokenData, user: &UserData) -> Result<()> {
        let data = SessionData {
            access_token: tokens.access.clone(),
            refresh_token: tokens.refresh.clone(),
            user: user.clone(),
            logged_in_at: Utc::now(),
        };
        self.replace(Some(data))?;
        tracing::info!(user = %user.email, role = %user.role, "Logged in");
        Ok(())
    }

    /// Whether an access token is stored
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.read(|d| !d.access_token.is_empty()).unwrap_or(false)
    }

    /// Current access token
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(|d| d.access_token.clone()).filter(|t| !t.is_empty())
    }

    /// Current refresh token
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read(|d| d.refresh_token.clone()).filter(|t| !t.is_empty())
    }

    /// Stored user
    #[must_use]
    pub fn current_user(&self) -> Option<UserData> {
        self.read(|d| d.user.clone())
    }

    /// Role of the stored user; `Student` when logged out
    #[must_use]
    pub fn user_role(&self) -> Role {
        self.read(|d| d.user.role).unwrap_or_default()
    }

    /// Whether the stored user is an admin
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_role().is_admin()
    }

    /// Stored user's name
    #[must_use]
    pub fn user_name(&self) -> Option<String> {
        self.read(|d| d.user.name.clone())
    }

    /// Stored user's email
    #[must_use]
    pub fn user_email(&self) -> Option<String> {
        self.read(|d| d.user.email.clone())
    }

    /// Replace the stored user, keeping tokens
    pub fn update_user(&self, user: &UserData) -> Result<()> {
        self.modify(|d| d.user = user.clone())
    }

    /// Store a refreshed access token and, when rotated, the new refresh token
    pub fn update_tokens(&self, access: &str, refresh: Option<&str>) -> Result<()> {
        self.modify(|d| {
            d.access_token = access.to_string();
            if let Some(refresh) = refresh {
                d.refresh_token = refresh.to_string();
            }
        })
    }

    /// Forget the session and delete the file
    pub fn logout(&self) -> Result<()> {
        self.replace(None)?;
        tracing::info!("Logged out");
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&SessionData) -> T) -> Option<T> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }

    fn modify(&self, f: impl FnOnce(&mut SessionData)) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = guard.as_ref().ok_or_else(Error::not_logged_in)?.clone();
        f(&mut updated);
        self.persist(Some(&updated))?;
        *guard = Some(updated);
        Ok(())
    }

    fn replace(&self, data: Option<SessionData>) -> Result<()> {
        self.persist(data.as_ref())?;
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;
        Ok(())
    }

    fn persist(&self, data: Option<&SessionData>) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        match data {
            Some(data) => write_atomic(path, &serde_json::to_vec_pretty(data)?),
            None => match fs::remove_file(path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(Error::new(
                    ErrorCode::SessionError,
                    format!("Failed to remove session file {}: {e}", path.display()),
                )),
                _ => Ok(()),
            },
        }
    }
}

/// Write via a sibling temp file and rename, readable by the owner only
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    // A stale temp file or symlink must not be written through
    match fs::remove_file(&tmp) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e.into()),
        _ => {}
    }

    let result = write_private(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    result.map_err(|e| {
        let _ = fs::remove_file(&tmp);
        Error::new(
            ErrorCode::SessionError,
            format!("Failed to write session file {}: {e}", path.display()),
        )
    })
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
