//! Configuration file loading and saving

use super::schema::{ConfigSchema, MAX_UTC_OFFSET_MINUTES};
use crate::error::{Error, ErrorCode, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding a full API base URL
pub const ENV_API_URL: &str = "EVENTMANAGER_API_URL";
/// Environment variable overriding the server host
pub const ENV_SERVER_HOST: &str = "EVENTMANAGER_SERVER_HOST";
/// Environment variable overriding the server port
pub const ENV_SERVER_PORT: &str = "EVENTMANAGER_SERVER_PORT";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "EVENTMANAGER_TIMEOUT_SECS";
/// Environment variable overriding the session file location
pub const ENV_SESSION_FILE: &str = "EVENTMANAGER_SESSION_FILE";

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration values
    pub schema: ConfigSchema,
    /// File the configuration was read from, if any
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path, the standard locations, or defaults,
    /// then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let mut schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        apply_overrides(&mut schema, |key| env::var(key).ok())?;
        validate(&schema)?;

        tracing::debug!(
            path = ?config_path,
            base_url = %schema.server.base_url(),
            "Configuration loaded"
        );

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        validate(&self.schema)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self.schema)?;
        std::fs::write(path, content).map_err(|e| {
            Error::new(
                ErrorCode::IoError,
                format!("Failed to write config file {}: {e}", path.display()),
            )
        })?;
        tracing::debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// What is stored in the writable file, without environment overrides;
    /// defaults when the file does not exist yet
    pub fn stored_schema(&self) -> Result<ConfigSchema> {
        match self.writable_path() {
            Some(p) if p.exists() => load_config_file(&p),
            _ => Ok(ConfigSchema::default()),
        }
    }

    /// Where server changes are persisted: the loaded file, else the user config file
    #[must_use]
    pub fn writable_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(user_config_path)
    }
}

/// The per-user configuration file (`<config_dir>/eventmanager/config.toml`)
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("eventmanager").join("config.toml"))
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".eventmanager.toml", "eventmanager.toml"];

    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| user_config_path().filter(|p| p.exists()))
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::new(
            ErrorCode::IoError,
            format!("Failed to read config file {}: {e}", path.display()),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {e}", path.display()),
        )
    })
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_overrides<F>(schema: &mut ConfigSchema, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        schema.server.base_url = Some(url);
    }
    if let Some(host) = lookup(ENV_SERVER_HOST).filter(|v| !v.trim().is_empty()) {
        schema.server.host = host.trim().to_string();
    }
    if let Some(port) = lookup(ENV_SERVER_PORT) {
        schema.server.port = port.trim().parse().map_err(|_| {
            Error::invalid_config_value(ENV_SERVER_PORT, format!("'{port}' is not a port"))
        })?;
    }
    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
        schema.http.timeout_secs = timeout.trim().parse().map_err(|_| {
            Error::invalid_config_value(ENV_TIMEOUT_SECS, format!("'{timeout}' is not a number"))
        })?;
    }
    if let Some(file) = lookup(ENV_SESSION_FILE).filter(|v| !v.trim().is_empty()) {
        schema.session.path = Some(PathBuf::from(file));
    }
    Ok(())
}

/// Check configuration values
pub fn validate(schema: &ConfigSchema) -> Result<()> {
    let server = &schema.server;

    if server.base_url.is_none() {
        if server.host.trim().is_empty() {
            return Err(Error::invalid_config_value("server.host", "cannot be empty"));
        }
        if server.port == 0 {
            return Err(Error::invalid_config_value("server.port", "must be between 1 and 65535"));
        }
        if server.scheme != "http" && server.scheme != "https" {
            return Err(Error::invalid_config_value("server.scheme", "must be http or https"));
        }
    } else {
        let url = server.base_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::invalid_config_value(
                "server.base_url",
                "must start with http:// or https://",
            ));
        }
    }

    if server.event_utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
        return Err(Error::invalid_config_value(
            "server.event_utc_offset_minutes",
            format!("must be between -{MAX_UTC_OFFSET_MINUTES} and {MAX_UTC_OFFSET_MINUTES}"),
        ));
    }

    if schema.http.timeout_secs == 0 {
        return Err(Error::invalid_config_value("http.timeout_secs", "cannot be zero"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.server.port, 8000);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.schema.server.host = "192.168.1.100".to_string();
        config.schema.server.port = 8080;
        config.save(&path).unwrap();

        let loaded = load_config_file(&path).unwrap();
        assert_eq!(loaded.server.host, "192.168.1.100");
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.base_url(), "http://192.168.1.100:8080/api/");
    }

    #[test]
    fn test_stored_schema_ignores_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let mut schema = load_config_file(&path).unwrap();
        apply_overrides(&mut schema, env_of(&[(ENV_SERVER_HOST, "10.0.0.5")])).unwrap();
        let config = Config {
            schema,
            path: Some(path),
        };
        assert_eq!(config.schema.server.host, "10.0.0.5");

        let stored = config.stored_schema().unwrap();
        assert_eq!(stored.server.host, "127.0.0.1");
        assert_eq!(stored.server.port, 9000);
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.message.contains("broken.toml"));
    }

    #[test]
    fn test_env_overrides() {
        let mut schema = ConfigSchema::default();
        apply_overrides(
            &mut schema,
            env_of(&[
                (ENV_SERVER_HOST, "10.0.2.2"),
                (ENV_SERVER_PORT, "9000"),
                (ENV_TIMEOUT_SECS, "5"),
                (ENV_SESSION_FILE, "/tmp/session.json"),
            ]),
        )
        .unwrap();

        assert_eq!(schema.server.base_url(), "http://10.0.2.2:9000/api/");
        assert_eq!(schema.http.timeout_secs, 5);
        assert_eq!(schema.session.path, Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn test_env_api_url_wins() {
        let mut schema = ConfigSchema::default();
        apply_overrides(&mut schema, env_of(&[(ENV_API_URL, "https://events.example.com/api")]))
            .unwrap();
        assert_eq!(schema.server.base_url(), "https://events.example.com/api/");
    }

    #[test]
    fn test_env_bad_port() {
        let mut schema = ConfigSchema::default();
        let err = apply_overrides(&mut schema, env_of(&[(ENV_SERVER_PORT, "eighty")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_validation() {
        assert!(validate(&ConfigSchema::default()).is_ok());

        let mut schema = ConfigSchema::default();
        schema.server.host = String::new();
        assert!(validate(&schema).is_err());

        let mut schema = ConfigSchema::default();
        schema.server.scheme = "ftp".to_string();
        assert!(validate(&schema).is_err());

        let mut schema = ConfigSchema::default();
        schema.http.timeout_secs = 0;
        assert!(validate(&schema).is_err());

        let mut schema = ConfigSchema::default();
        schema.server.base_url = Some("events.example.com".to_string());
        assert!(validate(&schema).is_err());
    }

    #[test]
    fn test_event_offset_must_fit_a_day() {
        let mut schema = ConfigSchema::default();
        schema.server.event_utc_offset_minutes = -MAX_UTC_OFFSET_MINUTES;
        assert!(validate(&schema).is_ok());

        schema.server.event_utc_offset_minutes = 24 * 60;
        let err = validate(&schema).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
        assert!(err.to_string().contains("server.event_utc_offset_minutes"));
    }
}
