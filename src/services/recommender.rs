use std::sync::Arc;

use tracing::instrument;

use crate::error::AppResult;
use crate::models::{
    FeedbackLabel, Location, Outfit, Preferences, RecommendContext, RecommendResponse, UserProfile,
    WardrobeItem, Weather,
};
use crate::store::{ProfileStore, WardrobeStore};

use super::classifier::classify;
use super::engine::{self, Signals};
use super::generator::{validate_drafts, GenerationRequest, OutfitGenerator};

/// Inputs for one recommendation
#[derive(Debug, Clone, Default)]
pub struct RecommendInput {
    pub weather: Option<Weather>,
    pub location: Option<Location>,
    pub preferences: Option<Preferences>,
}

/// Request orchestration around the deterministic engine
///
/// Fetches materialized data from the injected stores, then hands it to the
/// synchronous engine. The generative override only runs when enabled and a
/// generator is configured.
#[derive(Clone)]
pub struct Recommender {
    wardrobes: Arc<dyn WardrobeStore>,
    profiles: Arc<dyn ProfileStore>,
    generator: Option<Arc<dyn OutfitGenerator>>,
    ai_enable: bool,
}

impl Recommender {
    pub fn new(wardrobes: Arc<dyn WardrobeStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            wardrobes,
            profiles,
            generator: None,
            ai_enable: false,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn OutfitGenerator>, ai_enable: bool) -> Self {
        self.generator = Some(generator);
        self.ai_enable = ai_enable;
        self
    }

    #[instrument(skip(self, input))]
    pub async fn recommend(&self, user_id: &str, input: RecommendInput) -> AppResult<RecommendResponse> {
        let records = self.wardrobes.fetch_wardrobe(user_id).await?;
        let profile = self.profiles.get_profile(user_id).await?;
        let items = engine::usable_items(records);

        let weather = input.weather.clone().unwrap_or_default();
        let preferences = input
            .preferences
            .as_ref()
            .filter(|p| **p != Preferences::default());
        let signals = Signals {
            weather: &weather,
            location: input.location.as_ref(),
            preferences,
            profile: profile.as_ref(),
        };

        let used_memory = !items.is_empty() && (profile.is_some() || preferences.is_some());

        let outfits = match self.generated_outfits(user_id, &items, &input, &signals).await {
            Some(outfits) => outfits,
            None => vec![engine::select_outfit(&items, &signals)],
        };

        tracing::info!(
            items = items.len(),
            chosen = outfits.first().map(|o| o.items.len()).unwrap_or(0),
            used_memory,
            "Recommendation ready"
        );

        Ok(RecommendResponse {
            outfits,
            context: RecommendContext {
                weather: input.weather,
                location: input.location,
            },
            used_memory,
        })
    }

    /// Validated outfits from the generator, or `None` to use the engine
    async fn generated_outfits(
        &self,
        user_id: &str,
        items: &[WardrobeItem],
        input: &RecommendInput,
        signals: &Signals<'_>,
    ) -> Option<Vec<Outfit>> {
        let generator = self.generator.as_ref().filter(|_| self.ai_enable)?;
        if items.is_empty() {
            return None;
        }

        let request = GenerationRequest {
            user_id: user_id.to_string(),
            items: items.to_vec(),
            weather: signals.weather.clone(),
            location: input.location.clone(),
            preferences: input.preferences.clone(),
        };

        let drafts = match generator.draft(&request).await {
            Ok(drafts) => drafts,
            Err(e) => {
                tracing::warn!(error = %e, "Generator failed, using deterministic engine");
                return None;
            }
        };

        let drafts = validate_drafts(drafts, items);
        if drafts.is_empty() {
            tracing::info!("No usable generated outfits, using deterministic engine");
            return None;
        }

        let outfits = drafts
            .iter()
            .map(|draft| {
                let chosen: Vec<(WardrobeItem, _)> = draft
                    .items
                    .iter()
                    .filter_map(|id| items.iter().find(|i| &i.id == id))
                    .map(|item| (item.clone(), classify(item)))
                    .collect();
                engine::outfit_for_items(&chosen, signals, draft.why.as_deref())
            })
            .collect();

        Some(outfits)
    }

    /// Applies like/dislike feedback to the user's stored profile
    #[instrument(skip(self, item_ids))]
    pub async fn feedback(
        &self,
        user_id: &str,
        item_ids: &[String],
        label: FeedbackLabel,
    ) -> AppResult<UserProfile> {
        let records = self.wardrobes.fetch_wardrobe(user_id).await?;
        let items: Vec<WardrobeItem> = records
            .iter()
            .filter_map(|record| WardrobeItem::try_from(record).ok())
            .filter(|item| item_ids.contains(&item.id))
            .collect();

        let mut profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .unwrap_or_else(|| UserProfile::new(user_id));
        profile.apply_feedback(item_ids, &items, label);

        tracing::info!(
            items = item_ids.len(),
            matched = items.len(),
            label = ?label,
            "Feedback recorded"
        );

        self.profiles.save_profile(profile.clone()).await?;
        Ok(profile)
    }
}
