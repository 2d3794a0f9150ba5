use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

use crate::{utils, warning};

type CodeSender = oneshot::Sender<Result<String, String>>;

/// Shared between the callback handler and the waiting login flow.
///
/// The sender is taken by the first callback hit, so only one outcome is
/// ever delivered.
#[derive(Clone)]
pub struct CallbackState {
    expected_state: String,
    sender: Arc<Mutex<Option<CodeSender>>>,
}

impl CallbackState {
    pub fn new(expected_state: String, sender: CodeSender) -> Self {
        Self {
            expected_state,
            sender: Arc::new(Mutex::new(Some(sender))),
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<CallbackState>,
) -> Html<&'static str> {
    let outcome = utils::code_from_params(&params, &shared_state.expected_state, true);

    let page = match &outcome {
        Ok(_) => Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>"),
        Err(e) => {
            warning!("Authorization callback rejected: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    };

    match shared_state.sender.lock().await.take() {
        Some(sender) => {
            let _ = sender.send(outcome);
            page
        }
        None => Html("<h4>Authorization already completed.</h4>"),
    }
}
