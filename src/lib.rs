//! Magazine Playlist Builder Library
//!
//! This library fills a Spotify playlist with the albums listed on magazine web
//! pages. It covers the OAuth 2.0 authorization-code flow with a cached and
//! automatically refreshed credential, a thin Spotify Web API client, and the
//! page scraping that produces the artist/album pairs to look up.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback listener
//! - `cli` - Command-line interface implementations
//! - `config` - Environment loading and the explicit [`config::Settings`] struct
//! - `error` - The crate-wide [`error::Error`] type
//! - `ingest` - Magazine page scraping
//! - `management` - Credential caching on top of pluggable key-value storage
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - OAuth flow, session handling and the Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotmag::{config, management::{FileStore, TokenStore}, spotify};
//!
//! #[tokio::main]
//! async fn main() -> spotmag::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env()?;
//!     let store = TokenStore::new(Box::new(FileStore::default_location()));
//!     let flow = spotify::auth::OAuthFlow::new(&settings);
//!     let codes = spotify::auth::PromptForCode;
//!     let session = spotify::Session::start(flow, store, settings.scopes.clone(), &codes).await?;
//!     let mut client = spotify::ApiClient::new(&settings, session);
//!     println!("{}", client.current_user_id().await?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`error::Error`], so callers
/// can tell an authentication failure from an API failure without string
/// matching.
///
/// # Example
///
/// ```
/// use spotmag::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} albums", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary uses it; library
/// code returns [`error::Error`] instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as an unreadable credential cache or an
/// album that could not be found.
///
/// # Example
///
/// ```
/// warning!("Cache record is corrupt, logging in again");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
