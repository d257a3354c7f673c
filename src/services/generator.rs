use std::collections::HashSet;

use serde::Serialize;

use crate::models::{DraftOutfit, Location, Preferences, WardrobeItem, Weather};

/// Everything a generative collaborator sees for one request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub user_id: String,
    pub items: Vec<WardrobeItem>,
    pub weather: Weather,
    pub location: Option<Location>,
    pub preferences: Option<Preferences>,
}

/// Optional generative outfit source
///
/// Drafts are untrusted: identifiers are checked against the current
/// wardrobe before any of them reach a response.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait OutfitGenerator: Send + Sync {
    async fn draft(&self, request: &GenerationRequest) -> anyhow::Result<Vec<DraftOutfit>>;
}

/// Drops unknown and repeated identifiers, then drafts left with no items
pub fn validate_drafts(drafts: Vec<DraftOutfit>, items: &[WardrobeItem]) -> Vec<DraftOutfit> {
    let known: HashSet<&str> = items.iter().map(|i| i.id.as_str()).collect();

    drafts
        .into_iter()
        .filter_map(|draft| {
            let proposed = draft.items.len();
            let mut seen = HashSet::new();
            let kept: Vec<String> = draft
                .items
                .into_iter()
                .filter(|id| known.contains(id.as_str()) && seen.insert(id.clone()))
                .collect();

            if kept.len() < proposed {
                tracing::debug!(
                    proposed,
                    kept = kept.len(),
                    "Dropped identifiers not present in wardrobe"
                );
            }

            (!kept.is_empty()).then(|| DraftOutfit {
                items: kept,
                why: draft.why,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wardrobe() -> Vec<WardrobeItem> {
        ["t1", "b1", "s1"]
            .iter()
            .map(|id| WardrobeItem {
                id: id.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn draft(ids: &[&str]) -> DraftOutfit {
        DraftOutfit {
            items: ids.iter().map(|s| s.to_string()).collect(),
            why: Some("Looks good".to_string()),
        }
    }

    #[test]
    fn test_unknown_ids_are_silently_dropped() {
        let valid = validate_drafts(vec![draft(&["t1", "ghost", "s1"])], &wardrobe());
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].items, vec!["t1", "s1"]);
        assert_eq!(valid[0].why.as_deref(), Some("Looks good"));
    }

    #[test]
    fn test_empty_drafts_removed() {
        let valid = validate_drafts(vec![draft(&["ghost"]), draft(&[]), draft(&["b1", "b1"])], &wardrobe());
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].items, vec!["b1"]);
    }

    #[tokio::test]
    async fn test_mock_generator_drafts_are_validated() {
        let mut generator = MockOutfitGenerator::new();
        generator
            .expect_draft()
            .times(1)
            .returning(|_| Ok(vec![draft(&["t1", "nope"])]));

        let request = GenerationRequest {
            user_id: "u1".to_string(),
            items: wardrobe(),
            weather: Weather::new(70.0, None),
            location: None,
            preferences: None,
        };

        let drafts = generator.draft(&request).await.unwrap();
        let valid = validate_drafts(drafts, &request.items);
        assert_eq!(valid[0].items, vec!["t1"]);
    }
}
