use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::WardrobeItem;

/// Request-level style preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Preferences {
    /// Desired occasion, e.g. "date-night", "office"
    #[serde(default)]
    pub occasion: Option<String>,
    /// Desired style vibe, e.g. "smart-casual", "streetwear"
    #[serde(default)]
    pub style_vibe: Option<String>,
    #[serde(default)]
    pub prefer_favorites: bool,
    #[serde(default)]
    pub avoid_colors: Vec<String>,
}

/// Feedback label for a suggested outfit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackLabel {
    Like,
    Dislike,
}

impl FeedbackLabel {
    fn weight(self) -> f64 {
        match self {
            FeedbackLabel::Like => 1.0,
            FeedbackLabel::Dislike => -1.0,
        }
    }
}

/// Long-term personalization counters for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    #[serde(default)]
    pub liked_item_ids: BTreeSet<String>,
    #[serde(default)]
    pub disliked_item_ids: BTreeSet<String>,
    /// Lowercased colour -> accumulated like/dislike count
    #[serde(default)]
    pub preferred_colors: HashMap<String, f64>,
    /// Lowercased fabric -> accumulated like/dislike count
    #[serde(default)]
    pub preferred_fabrics: HashMap<String, f64>,
    /// Lowercased formality -> accumulated like/dislike count
    #[serde(default)]
    pub preferred_formality: HashMap<String, f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Creates an empty profile
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    /// Records feedback on a set of items
    ///
    /// `items` are the wardrobe items behind `item_ids` that could be found;
    /// their colour, fabric and formality counters move by +1 for a like and
    /// -1 for a dislike.
    pub fn apply_feedback(&mut self, item_ids: &[String], items: &[WardrobeItem], label: FeedbackLabel) {
        match label {
            FeedbackLabel::Like => {
                for id in item_ids {
                    self.disliked_item_ids.remove(id);
                    self.liked_item_ids.insert(id.clone());
                }
            }
            FeedbackLabel::Dislike => {
                self.disliked_item_ids.extend(item_ids.iter().cloned());
            }
        }

        let delta = label.weight();
        for item in items {
            if let Some(color) = item.primary_color.as_deref() {
                *self
                    .preferred_colors
                    .entry(color.to_lowercase())
                    .or_insert(0.0) += delta;
            }
            if let Some(fabric) = item.fabric.as_deref() {
                *self
                    .preferred_fabrics
                    .entry(fabric.to_lowercase())
                    .or_insert(0.0) += delta;
            }
            if let Some(formality) = item.formality.as_deref() {
                *self
                    .preferred_formality
                    .entry(formality.trim().to_lowercase())
                    .or_insert(0.0) += delta;
            }
        }

        self.last_updated = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, color: &str, fabric: &str) -> WardrobeItem {
        WardrobeItem {
            id: id.to_string(),
            primary_color: Some(color.to_string()),
            fabric: Some(fabric.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_preferences_deserialize_with_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"occasion":"office"}"#).unwrap();
        assert_eq!(prefs.occasion.as_deref(), Some("office"));
        assert!(!prefs.prefer_favorites);
        assert!(prefs.avoid_colors.is_empty());
    }

    #[test]
    fn test_like_updates_sets_and_counters() {
        let mut profile = UserProfile::new("u1");
        profile.disliked_item_ids.insert("a".to_string());

        let ids = vec!["a".to_string(), "b".to_string()];
        let items = vec![item("a", "Navy", "Cotton"), item("b", "navy", "denim")];
        profile.apply_feedback(&ids, &items, FeedbackLabel::Like);

        assert!(profile.liked_item_ids.contains("a"));
        assert!(profile.liked_item_ids.contains("b"));
        assert!(profile.disliked_item_ids.is_empty());
        assert_eq!(profile.preferred_colors.get("navy"), Some(&2.0));
        assert_eq!(profile.preferred_fabrics.get("cotton"), Some(&1.0));
        assert!(profile.last_updated.is_some());
    }

    #[test]
    fn test_dislike_decrements_counters() {
        let mut profile = UserProfile::new("u1");
        let ids = vec!["a".to_string()];
        profile.apply_feedback(&ids, &[item("a", "red", "wool")], FeedbackLabel::Dislike);

        assert!(profile.disliked_item_ids.contains("a"));
        assert_eq!(profile.preferred_colors.get("red"), Some(&-1.0));
        assert_eq!(profile.preferred_fabrics.get("wool"), Some(&-1.0));
    }

    #[test]
    fn test_formality_counter_follows_feedback() {
        let mut profile = UserProfile::new("u1");
        let mut blazer = item("a", "black", "wool");
        blazer.formality = Some("Formal".to_string());
        let ids = vec!["a".to_string()];

        profile.apply_feedback(&ids, std::slice::from_ref(&blazer), FeedbackLabel::Like);
        profile.apply_feedback(&ids, std::slice::from_ref(&blazer), FeedbackLabel::Like);
        assert_eq!(profile.preferred_formality.get("formal"), Some(&2.0));

        profile.apply_feedback(&ids, &[blazer], FeedbackLabel::Dislike);
        assert_eq!(profile.preferred_formality.get("formal"), Some(&1.0));

        let mut plain = UserProfile::new("u2");
        plain.apply_feedback(&ids, &[item("a", "red", "wool")], FeedbackLabel::Like);
        assert!(plain.preferred_formality.is_empty());
    }

    #[test]
    fn test_feedback_label_serialization() {
        let label: FeedbackLabel = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(label, FeedbackLabel::Dislike);
    }
}
