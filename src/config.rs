//! Configuration loading for chat-commander.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::protocol::Member;

/// Service directory queried by `services` and `service`.
pub const DEFAULT_DIRECTORY_URL: &str =
    "https://europe-west1-cloud-functions-talk-22365.cloudfunctions.net/services";

/// Membership directory base URL.
pub const DEFAULT_MEMBERSHIP_URL: &str =
    "https://europe-west1-cloud-functions-talk-22365.cloudfunctions.net";

/// Get the chat-commander home directory (~/.chat-commander).
pub fn get_home_dir() -> Result<PathBuf> {
    let home = directories::UserDirs::new()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

    Ok(home.home_dir().join(".chat-commander"))
}

/// Get the settings file path.
pub fn get_settings_path() -> Result<PathBuf> {
    Ok(get_home_dir()?.join("settings.json"))
}

/// Load settings from ~/.chat-commander/settings.json
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&get_settings_path()?)
}

/// Load and validate settings from an explicit path.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "Settings file not found at {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    validate_settings(&settings)?;

    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.member.name.trim().is_empty() {
        return Err(Error::Config("member.name must not be empty".to_string()));
    }
    if settings.membership.service_url.trim().is_empty() {
        return Err(Error::Config(
            "membership.service_url must not be empty".to_string(),
        ));
    }
    if settings.services.directory_url.trim().is_empty() {
        return Err(Error::Config(
            "services.directory_url must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// This process's identity in the chat group.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MemberConfig {
    #[serde(default = "default_member_name")]
    pub name: String,
    #[serde(default = "default_member_ip")]
    pub ip: String,
    #[serde(default = "default_member_port")]
    pub port: String,
    #[serde(default = "default_member_protocol")]
    pub protocol: String,
}

fn default_member_name() -> String {
    "chat".to_string()
}

fn default_member_ip() -> String {
    "127.0.0.1".to_string()
}

fn default_member_port() -> String {
    "22365".to_string()
}

fn default_member_protocol() -> String {
    "tcp".to_string()
}

impl Default for MemberConfig {
    fn default() -> Self {
        Self {
            name: default_member_name(),
            ip: default_member_ip(),
            port: default_member_port(),
            protocol: default_member_protocol(),
        }
    }
}

impl MemberConfig {
    pub fn to_member(&self) -> Member {
        Member::new(&self.name, &self.ip, &self.port, &self.protocol)
    }
}

/// Membership directory configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MembershipSettings {
    #[serde(default = "default_membership_url")]
    pub service_url: String,
}

fn default_membership_url() -> String {
    DEFAULT_MEMBERSHIP_URL.to_string()
}

impl Default for MembershipSettings {
    fn default() -> Self {
        Self {
            service_url: default_membership_url(),
        }
    }
}

/// Service directory configuration.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ServicesSettings {
    #[serde(default = "default_directory_url")]
    pub directory_url: String,
}

fn default_directory_url() -> String {
    DEFAULT_DIRECTORY_URL.to_string()
}

impl Default for ServicesSettings {
    fn default() -> Self {
        Self {
            directory_url: default_directory_url(),
        }
    }
}

/// HTTP client configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct HttpSettings {
    /// Request timeout. Absent means requests may block indefinitely.
    pub timeout_secs: Option<u64>,
}

impl HttpSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build the shared reqwest client.
    pub fn client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Logging configuration.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct LoggingSettings {
    pub dir: Option<PathBuf>,
}

/// chat-commander settings.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub member: MemberConfig,

    #[serde(default)]
    pub membership: MembershipSettings,

    #[serde(default)]
    pub services: ServicesSettings,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.member.name, "chat");
        assert_eq!(settings.member.protocol, "tcp");
        assert_eq!(settings.services.directory_url, DEFAULT_DIRECTORY_URL);
        assert!(settings.http.timeout().is_none());
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_partial_member_keeps_other_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"member": {"name": "alice", "port": "7000"}}"#).unwrap();
        let member = settings.member.to_member();
        assert_eq!(member.name, "alice");
        assert_eq!(member.port, "7000");
        assert_eq!(member.ip, "127.0.0.1");
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut settings = Settings::default();
        settings.member.name = "  ".to_string();
        assert!(matches!(validate_settings(&settings), Err(Error::Config(_))));
    }

    #[test]
    fn test_timeout_conversion() {
        let http = HttpSettings {
            timeout_secs: Some(5),
        };
        assert_eq!(http.timeout(), Some(Duration::from_secs(5)));
    }
}
