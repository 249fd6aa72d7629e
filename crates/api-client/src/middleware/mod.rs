//! Request/response logging
//!
//! Every exchange is logged at `debug` with method, URL, request id, status
//! and elapsed time. Bodies are logged at `trace` only when enabled, with
//! credentials masked first.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Replacement for masked values
pub const REDACTED: &str = "***";

/// Longest body that is logged verbatim
const MAX_LOGGED_BODY: usize = 2048;

/// Keys whose values never reach the log
const SECRET_KEYS: &[&str] = &[
    "otp",
    "token",
    "access",
    "refresh",
    "access_token",
    "refresh_token",
];

/// Whether a JSON key holds a credential
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("password") || SECRET_KEYS.contains(&key.as_str())
}

/// Mask credential values in place, at any depth
pub fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, v) in map.iter_mut() {
                if is_secret_key(key) && !v.is_null() {
                    *v = Value::String(REDACTED.to_string());
                } else {
                    redact_json(v);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {}
    }
}

/// Body text safe for logging: JSON is masked, anything else is cut short
#[must_use]
pub fn redact_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(mut value) => {
            redact_json(&mut value);
            truncate(&value.to_string(), MAX_LOGGED_BODY)
        }
        Err(_) => truncate(body, MAX_LOGGED_BODY),
    }
}

/// Cut `text` to at most `max` characters, marking the cut
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}... ({} bytes total)", &text[..idx], text.len()),
        None => text.to_string(),
    }
}

/// Logs HTTP exchanges for one client
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpLogger {
    log_bodies: bool,
}

impl HttpLogger {
    /// Create a logger; bodies are only logged when `log_bodies` is set
    #[must_use]
    pub fn new(log_bodies: bool) -> Self {
        Self { log_bodies }
    }

    /// Log an outgoing request
    pub fn request(&self, request_id: &str, method: &Method, url: &str, body: Option<&Value>) {
        debug!(request_id = %request_id, method = %method, url = %url, "--> request");
        if self.log_bodies {
            if let Some(body) = body {
                let mut masked = body.clone();
                redact_json(&mut masked);
                let body = truncate(&masked.to_string(), MAX_LOGGED_BODY);
                trace!(request_id = %request_id, body = %body, "--> body");
            }
        }
    }

    /// Log a received response
    pub fn response(&self, request_id: &str, status: StatusCode, elapsed: Duration, body: &str) {
        debug!(
            request_id = %request_id,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis(),
            bytes = body.len(),
            "<-- response"
        );
        if self.log_bodies && !body.is_empty() {
            trace!(request_id = %request_id, body = %redact_body(body), "<-- body");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_redacts_credentials() {
        let mut value = json!({
            "email": "ali@uni.edu",
            "password": "hunter22",
            "confirm_password": "hunter22",
            "otp": "123456",
            "tokens": {"access": "a.b.c", "refresh": "d.e.f"}
        });
        redact_json(&mut value);

        assert_eq!(value["email"], "ali@uni.edu");
        assert_eq!(value["password"], REDACTED);
        assert_eq!(value["confirm_password"], REDACTED);
        assert_eq!(value["otp"], REDACTED);
        assert_eq!(value["tokens"]["access"], REDACTED);
        assert_eq!(value["tokens"]["refresh"], REDACTED);
    }

    #[test]
    fn test_redact_body_non_json() {
        assert_eq!(redact_body("Internal Server Error"), "Internal Server Error");
        let long = "x".repeat(MAX_LOGGED_BODY + 10);
        assert!(redact_body(&long).ends_with(&format!("({} bytes total)", long.len())));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert!(truncate("héllo wörld", 3).starts_with("hél..."));
    }

    #[test]
    fn test_secret_keys() {
        assert!(is_secret_key("new_password"));
        assert!(is_secret_key("Refresh"));
        assert!(!is_secret_key("email"));
        assert!(!is_secret_key("tokens"));
    }
}
