use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    Res,
    config::Settings,
    error::{Error, provider_error},
    spotify::Session,
    types::User,
};

/// Authenticated access to the Spotify Web API.
///
/// Every request first asks the [`Session`] for a valid access token, so an
/// expired credential is refreshed before the request goes out. Requests are
/// issued one at a time and never retried.
pub struct ApiClient {
    http: Client,
    api_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(settings: &Settings, session: Session) -> Self {
        Self {
            http: Client::new(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `GET /me`
    pub async fn current_user_id(&mut self) -> Res<String> {
        let user: User = self.get("/me", &[]).await?;
        Ok(user.id)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Res<T> {
        let token = self.session.access_token().await?;
        let response = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        parse_response(response).await
    }

    pub(crate) async fn post<B, T>(&mut self, path: &str, body: &B) -> Res<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.session.access_token().await?;
        let response = self
            .http
            .post(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Decodes a Web API response, turning an `error` field into [`Error::Api`]
/// whatever the HTTP status was.
async fn parse_response<T: DeserializeOwned>(response: Response) -> Res<T> {
    let status = response.status();
    let body: Value = response.json().await?;

    if let Some((code, message)) = provider_error(&body) {
        return Err(Error::Api {
            status: code.unwrap_or(status.as_u16()),
            message,
        });
    }

    Ok(serde_json::from_value(body)?)
}
