//! Configuration management for the magazine playlist builder.
//!
//! This module loads configuration values from environment variables and a
//! `.env` file and gathers them into one explicit [`Settings`] value that is
//! handed to the OAuth flow and the API client. Nothing below the CLI reads the
//! process environment directly.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Res, error::Error};

pub const DEFAULT_SCOPE: &str = "playlist-read-private playlist-modify-private";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_PLAYLIST: &str = "Essential heavy";
pub const DEFAULT_ESSENTIALS_URL: &str = "https://www.heavymag.example/essential-albums";
pub const DEFAULT_REVIEWS_URL: &str = "https://www.heavymag.example/reviews";

/// Returns the application directory inside the platform's local data directory.
///
/// - Linux: `~/.local/share/spotmag`
/// - macOS: `~/Library/Application Support/spotmag`
/// - Windows: `%LOCALAPPDATA%/spotmag`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotmag");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is fine:
/// variables may just as well come from the real environment, which always
/// wins over the file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be created and
/// [`Error::Config`] if the file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use spotmag::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir).await?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))
}

/// Everything the OAuth flow and the API client need to know about the
/// provider and the run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Bind address of the local callback listener.
    pub server_addr: String,
    /// Playlist the albums are added to when `--playlist` is not given.
    pub playlist_name: String,
    pub essentials_url: String,
    pub reviews_url: String,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// `SPOTIFY_API_AUTH_CLIENT_ID`, `SPOTIFY_API_AUTH_CLIENT_SECRET` and
    /// `SPOTIFY_API_REDIRECT_URI` are required; everything else has a default.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scopes: parse_scopes(&optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            playlist_name: optional("SPOTMAG_PLAYLIST", DEFAULT_PLAYLIST),
            essentials_url: optional("SPOTMAG_ESSENTIALS_URL", DEFAULT_ESSENTIALS_URL),
            reviews_url: optional("SPOTMAG_REVIEWS_URL", DEFAULT_REVIEWS_URL),
        })
    }
}

/// Splits a space or comma separated scope string.
pub fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn required(key: &str) -> Res<String> {
    present(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
}

fn present(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn optional(key: &str, default: &str) -> String {
    present(key).unwrap_or_else(|| default.to_string())
}
