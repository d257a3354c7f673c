use std::sync::Arc;

use crate::config::Config;
use crate::services::{OutfitGenerator, Recommender};
use crate::store::{InMemoryStore, ProfileStore, WardrobeStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub wardrobes: Arc<dyn WardrobeStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub recommender: Recommender,
    pub config: Config,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state backed by a fresh in-memory store
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_stores(store.clone(), store, config)
    }

    pub fn from_stores(
        wardrobes: Arc<dyn WardrobeStore>,
        profiles: Arc<dyn ProfileStore>,
        config: Config,
    ) -> Self {
        Self {
            recommender: Recommender::new(wardrobes.clone(), profiles.clone()),
            wardrobes,
            profiles,
            config,
        }
    }

    /// Plugs in a generator; it is only consulted when `ai_enable` is set
    pub fn with_generator(mut self, generator: Arc<dyn OutfitGenerator>) -> Self {
        self.recommender = self
            .recommender
            .with_generator(generator, self.config.ai_enable);
        self
    }
}
