pub mod outfit;
pub mod preferences;
pub mod wardrobe;
pub mod weather;

pub use outfit::{
    CandidateOutfit, DraftOutfit, ItemDetail, Outfit, PreferenceBreakdown, RecommendContext,
    RecommendResponse, ScoreBreakdown, ScoredItem,
};
pub use preferences::{FeedbackLabel, Preferences, UserProfile};
pub use wardrobe::{Category, MalformedItem, WardrobeItem};
pub use weather::{Location, TemperatureBand, Weather};
