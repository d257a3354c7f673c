use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::UserProfile;

use super::{ProfileStore, WardrobeStore};

/// Process-local store backing both traits
#[derive(Clone, Default)]
pub struct InMemoryStore {
    wardrobes: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    profiles: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with a ready-made wardrobe
    pub async fn with_wardrobe(self, user_id: &str, records: Vec<Value>) -> Self {
        self.wardrobes
            .write()
            .await
            .insert(user_id.to_string(), records);
        self
    }
}

#[async_trait::async_trait]
impl WardrobeStore for InMemoryStore {
    async fn fetch_wardrobe(&self, user_id: &str) -> AppResult<Vec<Value>> {
        let wardrobes = self.wardrobes.read().await;
        Ok(wardrobes.get(user_id).cloned().unwrap_or_default())
    }

    async fn add_item(&self, user_id: &str, record: Value) -> AppResult<()> {
        let mut wardrobes = self.wardrobes.write().await;
        wardrobes.entry(user_id.to_string()).or_default().push(record);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(user_id).cloned())
    }

    async fn save_profile(&self, profile: UserProfile) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}
