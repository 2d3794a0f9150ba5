#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use spotmag::{
    config::Settings,
    management::{MemoryStore, TokenStore},
    spotify::{ApiClient, Session, auth::OAuthFlow},
    types::Credential,
};

/// `Basic` credentials for client id `id` and secret `secret`.
pub const BASIC_AUTH: &str = "Basic aWQ6c2VjcmV0";

pub fn scopes() -> Vec<String> {
    vec![
        "playlist-read-private".to_string(),
        "playlist-modify-private".to_string(),
    ]
}

pub fn settings(server_url: &str) -> Settings {
    Settings {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scopes: scopes(),
        auth_url: format!("{}/authorize", server_url),
        token_url: format!("{}/api/token", server_url),
        api_url: format!("{}/v1", server_url),
        server_addr: "127.0.0.1:0".to_string(),
        playlist_name: "Essential heavy".to_string(),
        essentials_url: format!("{}/essentials", server_url),
        reviews_url: format!("{}/reviews", server_url),
    }
}

pub fn credential(access_token: &str, expires_in_secs: i64) -> Credential {
    Credential {
        scopes: scopes(),
        access_token: access_token.to_string(),
        refresh_token: "old-refresh".to_string(),
        expires_at: Utc::now() + Duration::seconds(expires_in_secs),
    }
}

pub fn token_store(storage: &Arc<MemoryStore>) -> TokenStore {
    TokenStore::new(Box::new(Arc::clone(storage)))
}

/// API client whose session holds a credential that stays valid for an hour.
pub fn client(server_url: &str) -> ApiClient {
    let settings = settings(server_url);
    let storage = Arc::new(MemoryStore::new());
    let session = Session::with_credential(
        OAuthFlow::new(&settings),
        token_store(&storage),
        credential("token", 3600),
    );
    ApiClient::new(&settings, session)
}
