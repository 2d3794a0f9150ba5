mod auth;
mod store;

pub use auth::TokenStore;
pub use store::FileStore;
pub use store::KeyValueStore;
pub use store::MemoryStore;
