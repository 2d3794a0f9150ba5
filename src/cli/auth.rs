use crate::{
    Res,
    config::Settings,
    management::{FileStore, TokenStore},
    spotify::{
        Session,
        auth::{CodeSource, OAuthFlow},
    },
    success,
};

/// Logs in from scratch and replaces the cached credential.
pub async fn auth(settings: &Settings, codes: &dyn CodeSource) -> Res<()> {
    let store = TokenStore::new(Box::new(FileStore::default_location()));
    let session = Session::login(
        OAuthFlow::new(settings),
        store,
        settings.scopes.clone(),
        codes,
    )
    .await?;

    success!(
        "Authentication successful! Access token valid until {}.",
        session.credential().expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}
