//! Persistence boundary for wardrobes and user profiles.
//!
//! The engine only ever sees materialized data; stores are injected behind
//! these traits so any backend can sit behind the HTTP layer.

use serde_json::Value;

use crate::{error::AppResult, models::UserProfile};

pub mod memory;

pub use memory::InMemoryStore;

/// Source of raw wardrobe records, keyed by user
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WardrobeStore: Send + Sync {
    /// Raw records in insertion order; an unknown user has an empty wardrobe
    async fn fetch_wardrobe(&self, user_id: &str) -> AppResult<Vec<Value>>;

    async fn add_item(&self, user_id: &str, record: Value) -> AppResult<()>;
}

/// Long-term personalization counters, keyed by user
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    async fn save_profile(&self, profile: UserProfile) -> AppResult<()>;
}
