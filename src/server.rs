use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{
    Res,
    api::{self, CallbackState},
};

/// Serves the callback listener on an already bound socket until aborted.
pub async fn start_api_server(listener: TcpListener, state: CallbackState) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    axum::serve(listener, app).await?;
    Ok(())
}
