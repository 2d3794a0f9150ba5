//! # CLI Module
//!
//! User-facing commands of `spotmag`. Each command builds the pieces it needs
//! from the [`crate::config::Settings`] it is given, reports progress with the
//! crate's status macros and returns any failure to `main`, which prints it
//! and exits with status 1.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth login and caches the credential
//! - [`sync`] - Scrapes the magazine pages, resolves the albums on Spotify and
//!   adds their tracks to the playlist
//!
//! ## Data Flow
//!
//! ```text
//! magazine pages --scrape--> (artist, album) pairs
//!        --search--> album ids --albums--> track URIs --insert--> playlist
//! ```
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotmag auth                        # Log in once
//! spotmag                             # Essentials page into the default playlist
//! spotmag sync --source all --dry-run # See what would be added
//! ```

mod auth;
mod sync;

pub use auth::auth;
pub use sync::SourceSelection;
pub use sync::SyncOptions;
pub use sync::fill_playlist;
pub use sync::page_sources;
pub use sync::sync;
