pub mod assembler;
pub mod classifier;
pub mod engine;
pub mod explanation;
pub mod generator;
pub mod hygiene;
pub mod preference_score;
pub mod recommender;
pub mod weather_score;

pub use engine::{select_outfit, usable_items, ScoreError, Signals};
pub use generator::{GenerationRequest, OutfitGenerator};
pub use hygiene::{HygieneRejection, HygieneReport};
pub use recommender::{RecommendInput, Recommender};
