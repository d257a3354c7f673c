use serde_json::Value;
use thiserror::Error;

use crate::models::{
    Category, ItemDetail, Location, Outfit, Preferences, ScoreBreakdown, ScoredItem, UserProfile,
    WardrobeItem, Weather,
};

use super::assembler::{assemble, group_by_category};
use super::classifier::classify;
use super::explanation::{build_explanation, NO_WARDROBE_MESSAGE};
use super::hygiene;
use super::preference_score::{preference_score, profile_affinity};
use super::weather_score::weather_score;

/// Per-item scoring failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("{component} score is not finite ({value})")]
    NonFinite { component: &'static str, value: f64 },
}

/// Request-scoped signals the engine scores against
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    pub weather: &'a Weather,
    pub location: Option<&'a Location>,
    pub preferences: Option<&'a Preferences>,
    pub profile: Option<&'a UserProfile>,
}

impl<'a> Signals<'a> {
    pub fn new(weather: &'a Weather) -> Self {
        Self {
            weather,
            location: None,
            preferences: None,
            profile: None,
        }
    }
}

fn finite(component: &'static str, value: f64) -> Result<f64, ScoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoreError::NonFinite { component, value })
    }
}

/// Applies the hygiene gate and converts the surviving records to typed items
///
/// Malformed records are skipped with a warning.
pub fn usable_items(records: Vec<Value>) -> Vec<WardrobeItem> {
    let (records, _report) = hygiene::usable_or_all(records);

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match WardrobeItem::try_from(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, reason = %e, "Skipping malformed wardrobe record");
                None
            }
        })
        .collect()
}

/// Scores one item against weather, request preferences and the stored profile
pub fn score_item(item: &WardrobeItem, signals: &Signals<'_>) -> Result<ScoredItem, ScoreError> {
    let category = classify(item);
    let weather = finite("weather", weather_score(item, signals.weather))?;
    let (preference_total, preference) = preference_score(item, signals.preferences);
    finite("preference", preference_total)?;
    let profile = finite("profile", profile_affinity(item, signals.profile))?;

    let breakdown = ScoreBreakdown {
        weather,
        preference,
        profile,
    };
    let score = finite("total", breakdown.total())?;

    Ok(ScoredItem {
        item: item.clone(),
        category,
        score,
        breakdown,
        fallback_reason: None,
    })
}

/// Scores every item, substituting a neutral score for any item that fails
pub fn score_all(items: &[WardrobeItem], signals: &Signals<'_>) -> Vec<ScoredItem> {
    items
        .iter()
        .map(|item| {
            score_item(item, signals).unwrap_or_else(|e| {
                tracing::warn!(item_id = %item.id, reason = %e, "Scoring failed, using neutral score");
                ScoredItem {
                    item: item.clone(),
                    category: classify(item),
                    score: 0.0,
                    breakdown: ScoreBreakdown::default(),
                    fallback_reason: Some(e.to_string()),
                }
            })
        })
        .collect()
}

/// The response outfit for an empty wardrobe
pub fn empty_outfit() -> Outfit {
    Outfit {
        items: Vec::new(),
        why: NO_WARDROBE_MESSAGE.to_string(),
        items_detail: Vec::new(),
    }
}

/// Renders chosen items into an outfit, using `why` when it has content
pub fn outfit_for_items(
    chosen: &[(WardrobeItem, Category)],
    signals: &Signals<'_>,
    why: Option<&str>,
) -> Outfit {
    if chosen.is_empty() {
        return empty_outfit();
    }

    let items: Vec<WardrobeItem> = chosen.iter().map(|(item, _)| item.clone()).collect();
    let favorite_count = items.iter().filter(|i| i.is_favorite).count();

    let why = match why.map(str::trim).filter(|w| !w.is_empty()) {
        Some(w) => w.to_string(),
        None => build_explanation(&items, signals.weather, signals.location, favorite_count),
    };

    Outfit {
        items: items.iter().map(|i| i.id.clone()).collect(),
        why,
        items_detail: chosen
            .iter()
            .map(|(item, category)| ItemDetail::new(item, *category))
            .collect(),
    }
}

/// Runs the deterministic selection pipeline over typed items
pub fn select_outfit(items: &[WardrobeItem], signals: &Signals<'_>) -> Outfit {
    if items.is_empty() {
        tracing::info!("Wardrobe is empty, returning no-wardrobe outfit");
        return empty_outfit();
    }

    let grouped = group_by_category(score_all(items, signals));
    let chosen = assemble(&grouped, signals.weather.temp_f);

    for item in &chosen {
        tracing::debug!(
            item_id = %item.id(),
            category = %item.category,
            score = item.score,
            weather = item.breakdown.weather,
            profile = item.breakdown.profile,
            avoid_penalty = item.breakdown.preference.avoid_penalty,
            "Chosen item"
        );
    }

    let chosen: Vec<(WardrobeItem, Category)> = chosen
        .into_iter()
        .map(|scored| (scored.item, scored.category))
        .collect();

    outfit_for_items(&chosen, signals, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, item_type: &str, category: &str, color: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            item_type: Some(item_type.to_string()),
            category: Some(category.to_string()),
            primary_color: Some(color.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_usable_items_skips_malformed_records() {
        let records = vec![
            json!({ "id": "t1", "category": "top", "type": "shirt", "imageUrl": "https://cdn.myra.app/t1.png" }),
            json!({ "category": "bottom", "type": "jeans", "imageUrl": "https://cdn.myra.app/b.png" }),
            json!("not a record"),
        ];

        let items = usable_items(records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "t1");
    }

    #[test]
    fn test_usable_items_uses_unfiltered_when_nothing_passes() {
        let records = vec![json!({ "id": "t1", "category": "top", "imageUrl": "http://localhost/t.png" })];
        let items = usable_items(records);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_score_item_combines_components() {
        let weather = Weather::new(90.0, None);
        let prefs = Preferences {
            avoid_colors: vec!["white".to_string()],
            ..Default::default()
        };
        let signals = Signals {
            preferences: Some(&prefs),
            ..Signals::new(&weather)
        };

        let scored = score_item(&item("t1", "t-shirt", "top", "White"), &signals).unwrap();
        assert_eq!(scored.category, Category::Top);
        assert_eq!(scored.breakdown.weather, 1.0);
        assert!(scored.violates_avoid_colors());
        assert_eq!(scored.score, scored.breakdown.total());
    }

    #[test]
    fn test_non_finite_profile_falls_back_to_neutral() {
        let weather = Weather::new(65.0, None);
        let mut profile = UserProfile::new("u1");
        profile.preferred_colors.insert("red".to_string(), f64::INFINITY);
        let signals = Signals {
            profile: Some(&profile),
            ..Signals::new(&weather)
        };

        let items = vec![item("t1", "shirt", "top", "red"), item("b1", "jeans", "bottom", "blue")];
        assert!(matches!(
            score_item(&items[0], &signals),
            Err(ScoreError::NonFinite { component: "profile", .. })
        ));

        let scored = score_all(&items, &signals);
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].score, 0.0);
        assert!(scored[0].fallback_reason.is_some());
        assert!(scored[1].fallback_reason.is_none());
    }

    #[test]
    fn test_select_outfit_empty_wardrobe() {
        let weather = Weather::new(70.0, None);
        let outfit = select_outfit(&[], &Signals::new(&weather));
        assert!(outfit.items.is_empty());
        assert!(outfit.items_detail.is_empty());
        assert_eq!(outfit.why, NO_WARDROBE_MESSAGE);
    }

    #[test]
    fn test_select_outfit_details_mirror_items() {
        let weather = Weather::new(65.0, None);
        let items = vec![
            item("t1", "shirt", "top", "green"),
            item("b1", "chinos", "bottom", "tan"),
            item("s1", "loafers", "shoes", "brown"),
        ];

        let outfit = select_outfit(&items, &Signals::new(&weather));
        assert_eq!(outfit.items, vec!["t1", "b1", "s1"]);
        let detail_ids: Vec<&str> = outfit.items_detail.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(detail_ids, vec!["t1", "b1", "s1"]);
        assert_eq!(outfit.items_detail[2].category, Category::Shoe);
        assert!(outfit.why.contains("green shirt"));
    }

    #[test]
    fn test_outfit_for_items_prefers_supplied_why() {
        let weather = Weather::new(65.0, None);
        let chosen = vec![(item("t1", "shirt", "top", "green"), Category::Top)];
        let signals = Signals::new(&weather);

        assert_eq!(outfit_for_items(&chosen, &signals, Some("Great for brunch.")).why, "Great for brunch.");
        assert!(outfit_for_items(&chosen, &signals, Some("  ")).why.starts_with("For 65°F weather"));
    }
}
