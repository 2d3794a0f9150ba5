//! # Spotify Integration Module
//!
//! This module is the integration layer between the magazine scraper and
//! Spotify's services: the OAuth 2.0 authorization-code flow, the session that
//! keeps a cached credential valid, and a small Web API client.
//!
//! ## Architecture
//!
//! ```text
//! CLI / Ingestion
//!          ↓
//! ApiClient (user, playlists, search, albums, track insertion)
//!          ↓
//! Session (credential state machine)
//!     ├── OAuthFlow (authorize URL, code exchange, refresh)
//!     ├── CodeSource (paste-back prompt or local callback listener)
//!     └── TokenStore (one cached credential per scope-set)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Token Lifecycle
//!
//! A credential is created by the first interactive login and cached. Its
//! expiry is the provider-declared lifetime minus 60 seconds. Before every API
//! request the session checks the expiry and, once it has passed, exchanges
//! the refresh token for a new access token and writes the result back to the
//! cache. A refused refresh surfaces as [`crate::error::Error::Authentication`];
//! the user has to run `spotmag auth` again.
//!
//! ## API Coverage
//!
//! - `GET /me` - id of the authorized user
//! - `GET /users/{user_id}/playlists` - one page of the user's playlists
//! - `POST /users/{user_id}/playlists` - create a private playlist
//! - `GET /search?type=album` - resolve an artist/album pair
//! - `GET /albums/{id}` - album with its tracks
//! - `POST /playlists/{playlist_id}/tracks` - add tracks, 100 per request
//! - `POST /api/token` - code exchange and refresh (accounts service)
//!
//! ## Error Handling
//!
//! Any response body with an `error` field becomes
//! [`crate::error::Error::Api`] carrying the provider's message, whichever
//! endpoint produced it. There is no retry, backoff or rate-limit handling.
//!
//! ## Usage Patterns
//!
//! ```rust,ignore
//! let session = Session::start(flow, store, settings.scopes.clone(), &PromptForCode).await?;
//! let mut client = ApiClient::new(&settings, session);
//!
//! let user_id = client.current_user_id().await?;
//! let playlist = client.get_or_create_playlist(&user_id, "Essential heavy").await?;
//! client.add_albums_to_playlist(&playlist.id, &album_ids).await?;
//! ```

pub mod albums;
pub mod auth;
pub mod client;
pub mod playlist;
pub mod session;

pub use client::ApiClient;
pub use session::Session;
