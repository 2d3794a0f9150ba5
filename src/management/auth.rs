use crate::{Res, management::KeyValueStore, types::Credential, utils, warning};

/// Persists one [`Credential`] per scope-set.
pub struct TokenStore {
    storage: Box<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        TokenStore { storage }
    }

    /// Loads the cached credential for `scopes`.
    ///
    /// Unreadable or corrupt records are reported and treated like a missing
    /// one, which sends the caller through a fresh login.
    pub async fn load(&self, scopes: &[String]) -> Option<Credential> {
        let key = utils::cache_key(scopes);

        let content = match self.storage.get(&key).await {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                warning!("Cannot read credential cache {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&content) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warning!("Credential cache {} is corrupt, ignoring it: {}", key, e);
                None
            }
        }
    }

    pub async fn persist(&self, credential: &Credential) -> Res<()> {
        let json = serde_json::to_string_pretty(credential)?;
        self.storage
            .put(&utils::cache_key(&credential.scopes), &json)
            .await
    }

    /// Like [`TokenStore::persist`], but a failure only produces a warning.
    pub async fn save(&self, credential: &Credential) {
        if let Err(e) = self.persist(credential).await {
            warning!("Failed to save credential to cache: {}", e);
        }
    }
}
