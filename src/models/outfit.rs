use serde::{Deserialize, Serialize};

use super::{Category, Location, WardrobeItem, Weather};

/// Named components of an item's preference score
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PreferenceBreakdown {
    pub occasion: f64,
    pub style: f64,
    pub favorite: f64,
    pub avoid_penalty: f64,
}

impl PreferenceBreakdown {
    pub fn total(&self) -> f64 {
        self.occasion + self.style + self.favorite + self.avoid_penalty
    }
}

/// Full component breakdown behind a [`ScoredItem`]'s total
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub weather: f64,
    pub preference: PreferenceBreakdown,
    pub profile: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.weather + self.preference.total() + self.profile
    }
}

/// An item with its request-scoped score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: WardrobeItem,
    pub category: Category,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Why the item fell back to a neutral score, if it did
    pub fallback_reason: Option<String>,
}

impl ScoredItem {
    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// True when one of the item's colours is on the caller's avoid-list
    pub fn violates_avoid_colors(&self) -> bool {
        self.breakdown.preference.avoid_penalty < 0.0
    }
}

/// One assembled combination considered during selection
#[derive(Debug, Clone)]
pub struct CandidateOutfit<'a> {
    pub items: Vec<&'a ScoredItem>,
    pub score: f64,
    pub has_avoided_color: bool,
}

impl<'a> CandidateOutfit<'a> {
    pub fn new(items: Vec<&'a ScoredItem>) -> Self {
        let score = items.iter().map(|i| i.score).sum();
        let has_avoided_color = items.iter().any(|i| i.violates_avoid_colors());
        Self {
            items,
            score,
            has_avoided_color,
        }
    }
}

/// Item details mirrored back to the client for each chosen item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub id: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub item_type: Option<String>,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
}

impl ItemDetail {
    pub fn new(item: &WardrobeItem, category: Category) -> Self {
        Self {
            id: item.id.clone(),
            image_url: item.image_ref().map(str::to_string),
            category,
            item_type: item.item_type.clone(),
            color: item.primary_color.clone(),
            tags: item.tags.clone(),
            is_favorite: item.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub items: Vec<String>,
    pub why: String,
    pub items_detail: Vec<ItemDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendContext {
    pub weather: Option<Weather>,
    pub location: Option<Location>,
}

/// Response for a single recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendResponse {
    pub outfits: Vec<Outfit>,
    pub context: RecommendContext,
    pub used_memory: bool,
}

impl RecommendResponse {
    /// The ranked outfit, if one was produced
    pub fn best(&self) -> Option<&Outfit> {
        self.outfits.first()
    }
}

/// An outfit proposed by a generative collaborator, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DraftOutfit {
    #[serde(default, alias = "itemIds")]
    pub items: Vec<String>,
    #[serde(default)]
    pub why: Option<String>,
}
