//! Configuration management for riffgrade.
//!
//! Values come from environment variables and `.env` files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`<data_local_dir>/riffgrade/.env`)
//! 3. `.env` in the current working directory
//! 4. Application defaults (only for optional settings)
//!
//! Spotify client credentials, the redirect URI and the Gemini API key are
//! required; [`Settings::from_env`] fails when any of them is missing so the
//! process never starts half configured.

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TRACK_LIMIT: u32 = 20;
pub const MAX_TRACK_LIMIT: u32 = 50;
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads environment variables from `.env` files.
///
/// Creates `<data_local_dir>/riffgrade/` if needed, then loads the `.env`
/// found there and the one in the working directory. Missing files are fine,
/// variables already present in the environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/riffgrade/.env`
/// - macOS: `~/Library/Application Support/riffgrade/.env`
/// - Windows: `%LOCALAPPDATA%/riffgrade/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or a
/// present `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| format!("{}: {}", local.display(), e))?;
    }

    Ok(())
}

/// Location of the user level `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("riffgrade/.env");
    path
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server_address: String,
    pub spotify: SpotifySettings,
    pub gemini: GeminiSettings,
    pub track_limit: u32,
    pub session_ttl: Duration,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_url: Url,
    pub token_url: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup function.
    ///
    /// Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let optional = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let spotify = SpotifySettings {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            auth_url: absolute_url(
                "SPOTIFY_API_AUTH_URL",
                optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            )?,
            token_url: checked_url(
                "SPOTIFY_API_TOKEN_URL",
                optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            )?,
            api_url: checked_url(
                "SPOTIFY_API_URL",
                trim_slash(optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)),
            )?,
        };

        let gemini = GeminiSettings {
            api_key: required("GEMINI_API_KEY")?,
            api_url: checked_url(
                "GEMINI_API_URL",
                trim_slash(optional("GEMINI_API_URL", DEFAULT_GEMINI_API_URL)),
            )?,
            model: optional("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            timeout: Duration::from_secs(positive(
                "MODEL_TIMEOUT_SECS",
                get("MODEL_TIMEOUT_SECS"),
                DEFAULT_MODEL_TIMEOUT_SECS,
            )?),
        };

        let track_limit = positive(
            "TRACK_LIMIT",
            get("TRACK_LIMIT"),
            DEFAULT_TRACK_LIMIT as u64,
        )?;
        if track_limit > MAX_TRACK_LIMIT as u64 {
            return Err(ConfigError::Invalid {
                var: "TRACK_LIMIT",
                value: track_limit.to_string(),
                reason: format!("must be at most {}", MAX_TRACK_LIMIT),
            });
        }

        Ok(Settings {
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            spotify,
            gemini,
            track_limit: track_limit as u32,
            session_ttl: Duration::from_secs(positive(
                "SESSION_TTL_SECS",
                get("SESSION_TTL_SECS"),
                DEFAULT_SESSION_TTL_SECS,
            )?),
            http_timeout: Duration::from_secs(positive(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

fn positive(var: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(n) => Ok(n),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

/// Parses an absolute http(s) URL.
fn absolute_url(var: &'static str, value: String) -> Result<Url, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(url),
        Ok(_) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "must be an absolute http(s) URL".to_string(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

/// Like [`absolute_url`], keeping the configured text as is.
fn checked_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    absolute_url(var, value.clone())?;
    Ok(value)
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
