use chrono::Utc;

use crate::{
    Res,
    management::TokenStore,
    spotify::auth::{CodeSource, OAuthFlow},
    types::Credential,
};

/// Owns the credential for one scope-set and keeps it valid.
///
/// ```text
/// NoCredential -> AwaitingUserCode -> HasTokens -> Valid | Expired
/// Expired -> Refreshing -> Valid
/// ```
pub struct Session {
    flow: OAuthFlow,
    store: TokenStore,
    credential: Credential,
}

impl Session {
    /// Loads the cached credential for `scopes` or logs in when there is none,
    /// then refreshes it if it has expired.
    pub async fn start(
        flow: OAuthFlow,
        store: TokenStore,
        scopes: Vec<String>,
        codes: &dyn CodeSource,
    ) -> Res<Self> {
        let credential = match store.load(&scopes).await {
            Some(credential) => credential,
            None => {
                let credential = flow.login(&scopes, codes).await?;
                store.save(&credential).await;
                credential
            }
        };

        let mut session = Self::with_credential(flow, store, credential);
        session.refresh_if_needed().await?;
        Ok(session)
    }

    /// Logs in even if a cached credential exists and overwrites the cache.
    pub async fn login(
        flow: OAuthFlow,
        store: TokenStore,
        scopes: Vec<String>,
        codes: &dyn CodeSource,
    ) -> Res<Self> {
        let credential = flow.login(&scopes, codes).await?;
        store.save(&credential).await;
        Ok(Self::with_credential(flow, store, credential))
    }

    pub fn with_credential(flow: OAuthFlow, store: TokenStore, credential: Credential) -> Self {
        Self {
            flow,
            store,
            credential,
        }
    }

    /// Refreshes and persists the credential when it has expired.
    ///
    /// Returns whether a refresh exchange took place. A refused refresh is an
    /// authentication failure; there is no fallback to a new login.
    pub async fn refresh_if_needed(&mut self) -> Res<bool> {
        if !self.credential.is_expired(Utc::now()) {
            return Ok(false);
        }

        self.flow.refresh(&mut self.credential).await?;
        self.store.save(&self.credential).await;
        Ok(true)
    }

    /// Access token that is valid at the time of the call.
    pub async fn access_token(&mut self) -> Res<String> {
        self.refresh_if_needed().await?;
        Ok(self.credential.access_token.clone())
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}
