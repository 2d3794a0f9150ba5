use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    net::TcpListener,
    sync::oneshot,
};
use url::Url;

use crate::{
    Res,
    api::CallbackState,
    config::Settings,
    error::{Error, provider_error},
    info,
    server::start_api_server,
    types::{Credential, TokenResponse},
    utils, warning,
};

/// Turns an authorization URL into the code the provider hands back after the
/// user approved access.
#[async_trait]
pub trait CodeSource: Send + Sync {
    async fn authorization_code(&self, authorize_url: &str, state: &str) -> Res<String>;
}

/// Opens the browser and waits for the user to paste the code, or the whole
/// redirected URL, into the terminal. There is no timeout.
pub struct PromptForCode;

#[async_trait]
impl CodeSource for PromptForCode {
    async fn authorization_code(&self, authorize_url: &str, state: &str) -> Res<String> {
        open_browser(authorize_url);
        info!("After approving access, paste the code or the redirected URL here:");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let line = lines
            .next_line()
            .await?
            .ok_or_else(|| Error::CodeSource("stdin closed before a code was entered".into()))?;

        utils::parse_code_input(&line, state).map_err(Error::CodeSource)
    }
}

/// Receives the code through a local HTTP server bound to `addr`.
///
/// The configured redirect URI has to point at this address with the
/// `/callback` path.
pub struct CallbackListener {
    addr: String,
}

impl CallbackListener {
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

#[async_trait]
impl CodeSource for CallbackListener {
    async fn authorization_code(&self, authorize_url: &str, state: &str) -> Res<String> {
        let listener = TcpListener::bind(&self.addr).await?;
        let (tx, rx) = oneshot::channel();
        let server = tokio::spawn(start_api_server(
            listener,
            CallbackState::new(state.to_string(), tx),
        ));

        open_browser(authorize_url);
        info!("Waiting for the authorization callback on {}...", self.addr);

        let outcome = rx.await;
        server.abort();

        match outcome {
            Ok(result) => result.map_err(Error::CodeSource),
            Err(_) => Err(Error::CodeSource(
                "callback server stopped before a code arrived".into(),
            )),
        }
    }
}

/// Hands out a code known in advance.
pub struct FixedCode(pub String);

#[async_trait]
impl CodeSource for FixedCode {
    async fn authorization_code(&self, _authorize_url: &str, _state: &str) -> Res<String> {
        Ok(self.0.clone())
    }
}

fn open_browser(url: &str) {
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}

/// Authorization-code grant with client credentials against the accounts
/// service.
pub struct OAuthFlow {
    client: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: String,
    token_url: String,
}

impl OAuthFlow {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            auth_url: settings.auth_url.clone(),
            token_url: settings.token_url.clone(),
        }
    }

    /// Builds the URL the user has to visit to grant `scopes`.
    pub fn authorize_url(&self, scopes: &[String], state: &str) -> Res<String> {
        let url = Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", scopes.join(" ").as_str()),
                ("show_dialog", "true"),
                ("state", state),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid authorization url: {}", e)))?;

        Ok(url.into())
    }

    /// Runs the interactive part of the flow and exchanges the resulting code.
    pub async fn login(&self, scopes: &[String], codes: &dyn CodeSource) -> Res<Credential> {
        let state = utils::generate_state();
        let url = self.authorize_url(scopes, &state)?;
        let code = codes.authorization_code(&url, &state).await?;
        self.exchange_code(scopes, &code).await
    }

    pub async fn exchange_code(&self, scopes: &[String], code: &str) -> Res<Credential> {
        let token = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .await?;

        let expires_at = token.expires_at(Utc::now())?;
        let refresh_token = token.refresh_token.ok_or_else(|| {
            Error::Authentication("token response carries no refresh_token".into())
        })?;

        Ok(Credential {
            scopes: scopes.to_vec(),
            access_token: token.access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Exchanges the refresh token of `credential` for a new access token.
    pub async fn refresh(&self, credential: &mut Credential) -> Res<()> {
        let token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credential.refresh_token.as_str()),
            ])
            .await?;

        credential.apply(token, Utc::now())
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Res<TokenResponse> {
        let res = self
            .client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        let json: Value = serde_json::from_str(&text).map_err(|_| {
            Error::Authentication(format!("token endpoint answered {} with {}", status, text))
        })?;

        if let Some((_, message)) = provider_error(&json) {
            return Err(Error::Authentication(message));
        }

        serde_json::from_value(json)
            .map_err(|e| Error::Authentication(format!("malformed token response: {}", e)))
    }
}
