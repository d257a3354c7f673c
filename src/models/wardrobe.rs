use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;

/// Functional role of a garment, derived from its type and tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoe,
    Jacket,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoe => "shoe",
            Category::Jacket => "jacket",
            Category::Other => "other",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One garment owned by a user, in the typed form the engine works on
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WardrobeItem {
    /// Stable identifier, unique per user
    pub id: String,
    /// Free-text garment type (e.g. "t-shirt", "jeans")
    pub item_type: Option<String>,
    /// Free-text category hint as stored (e.g. "top", "shoes")
    pub category: Option<String>,
    pub primary_color: Option<String>,
    pub colors: Vec<String>,
    pub fabric: Option<String>,
    pub pattern: Option<String>,
    /// Formality label or level as stored (e.g. "casual", "business", "7")
    pub formality: Option<String>,
    pub season_tags: Vec<String>,
    pub occasion_tags: Vec<String>,
    pub style_vibe: Vec<String>,
    /// General and style tags merged together
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub clean_image_url: Option<String>,
    pub image_url: Option<String>,
}

impl WardrobeItem {
    /// Every colour of the item, primary first
    pub fn all_colors(&self) -> impl Iterator<Item = &str> {
        self.primary_color
            .iter()
            .chain(self.colors.iter())
            .map(String::as_str)
            .filter(|c| !c.trim().is_empty())
    }

    /// Processed image preferred over the raw upload
    pub fn image_ref(&self) -> Option<&str> {
        self.clean_image_url
            .as_deref()
            .or(self.image_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }

    pub fn type_lower(&self) -> String {
        self.item_type.as_deref().unwrap_or_default().to_lowercase()
    }
}

/// A raw record that could not be turned into a [`WardrobeItem`]
#[derive(Debug, Error)]
pub enum MalformedItem {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no identifier")]
    MissingId,
    #[error("unexpected field shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Loosely-typed record as supplied by the wardrobe store
///
/// Accepts the spellings the stored documents have used over time and
/// fields that may hold either a single string or a list of strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    #[serde(deserialize_with = "id_like")]
    id: Option<String>,
    #[serde(rename = "_id", deserialize_with = "id_like")]
    mongo_id: Option<String>,
    #[serde(rename = "type")]
    item_type: Option<String>,
    category: Option<String>,
    color: Option<String>,
    #[serde(rename = "primaryColor")]
    primary_color: Option<String>,
    color_name: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    colors: Vec<String>,
    fabric: Option<String>,
    pattern: Option<String>,
    #[serde(deserialize_with = "text_or_number")]
    formality: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    season: Vec<String>,
    #[serde(rename = "seasonTags", alias = "season_tags", deserialize_with = "one_or_many")]
    season_tags: Vec<String>,
    #[serde(rename = "occasionTags", alias = "occasion_tags", deserialize_with = "one_or_many")]
    occasion_tags: Vec<String>,
    #[serde(rename = "styleVibe", alias = "style_vibe", deserialize_with = "one_or_many")]
    style_vibe: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    tags: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    style_tags: Vec<String>,
    #[serde(rename = "isFavorite", alias = "is_favorite")]
    is_favorite: Option<bool>,
    #[serde(rename = "cleanImageUrl", alias = "clean_image_url")]
    clean_image_url: Option<String>,
    #[serde(rename = "imageUrl", alias = "image_url")]
    image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(OneOrMany::One(s)) if s.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v.into_iter().filter(|s| !s.trim().is_empty()).collect(),
        None => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdLike {
    Text(String),
    Number(i64),
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

fn id_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<IdLike> = Option::deserialize(deserializer)?;
    Ok(value.map(|id| match id {
        IdLike::Text(s) => s,
        IdLike::Number(n) => n.to_string(),
        IdLike::ObjectId { oid } => oid,
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TryFrom<&Value> for WardrobeItem {
    type Error = MalformedItem;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(MalformedItem::NotAnObject);
        }

        let raw = RawRecord::deserialize(value)?;

        let id = non_blank(raw.id)
            .or_else(|| non_blank(raw.mongo_id))
            .ok_or(MalformedItem::MissingId)?;

        let mut season_tags = raw.season_tags;
        season_tags.extend(raw.season);

        let mut tags = raw.tags;
        tags.extend(raw.style_tags);

        Ok(WardrobeItem {
            id,
            item_type: non_blank(raw.item_type),
            category: non_blank(raw.category),
            primary_color: non_blank(raw.primary_color)
                .or_else(|| non_blank(raw.color))
                .or_else(|| non_blank(raw.color_name)),
            colors: raw.colors,
            fabric: non_blank(raw.fabric),
            pattern: non_blank(raw.pattern),
            formality: non_blank(raw.formality),
            season_tags,
            occasion_tags: raw.occasion_tags,
            style_vibe: raw.style_vibe,
            tags,
            is_favorite: raw.is_favorite.unwrap_or(false),
            clean_image_url: non_blank(raw.clean_image_url),
            image_url: non_blank(raw.image_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converts_legacy_field_spellings() {
        let raw = json!({
            "_id": "abc123",
            "type": "T-Shirt",
            "category": "top",
            "primaryColor": "white",
            "seasonTags": ["summer"],
            "season": "spring",
            "occasionTags": ["casual"],
            "styleVibe": "relaxed",
            "style_tags": ["comfortable"],
            "isFavorite": true,
            "imageUrl": "https://cdn.example.org/raw.png",
            "cleanImageUrl": "https://cdn.example.org/clean.png"
        });

        let item = WardrobeItem::try_from(&raw).unwrap();
        assert_eq!(item.id, "abc123");
        assert_eq!(item.item_type.as_deref(), Some("T-Shirt"));
        assert_eq!(item.primary_color.as_deref(), Some("white"));
        assert_eq!(item.season_tags, vec!["summer", "spring"]);
        assert_eq!(item.style_vibe, vec!["relaxed"]);
        assert_eq!(item.tags, vec!["comfortable"]);
        assert!(item.is_favorite);
        assert_eq!(item.image_ref(), Some("https://cdn.example.org/clean.png"));
    }

    #[test]
    fn test_formality_accepts_label_or_level() {
        let label = WardrobeItem::try_from(&json!({ "id": "a", "formality": "Business" })).unwrap();
        assert_eq!(label.formality.as_deref(), Some("Business"));

        let level = WardrobeItem::try_from(&json!({ "id": "b", "formality": 7 })).unwrap();
        assert_eq!(level.formality.as_deref(), Some("7"));

        let blank = WardrobeItem::try_from(&json!({ "id": "c", "formality": " " })).unwrap();
        assert_eq!(blank.formality, None);
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let item = WardrobeItem::try_from(&json!({ "id": 42 })).unwrap();
        assert_eq!(item.id, "42");
    }

    #[test]
    fn test_object_id_and_color_spellings() {
        let raw = json!({
            "_id": { "$oid": "65f0c0ffee" },
            "color": "blue",
            "primaryColor": "navy"
        });
        let item = WardrobeItem::try_from(&raw).unwrap();
        assert_eq!(item.id, "65f0c0ffee");
        assert_eq!(item.primary_color.as_deref(), Some("navy"));
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let result = WardrobeItem::try_from(&json!({ "type": "jeans" }));
        assert!(matches!(result, Err(MalformedItem::MissingId)));

        let result = WardrobeItem::try_from(&json!({ "id": "   " }));
        assert!(matches!(result, Err(MalformedItem::MissingId)));
    }

    #[test]
    fn test_unexpected_shape_is_malformed() {
        let result = WardrobeItem::try_from(&json!({ "id": "x", "tags": 17 }));
        assert!(matches!(result, Err(MalformedItem::Shape(_))));

        let result = WardrobeItem::try_from(&json!(["not", "an", "object"]));
        assert!(matches!(result, Err(MalformedItem::NotAnObject)));
    }

    #[test]
    fn test_all_colors_skips_blanks() {
        let item = WardrobeItem {
            id: "1".to_string(),
            primary_color: Some("navy".to_string()),
            colors: vec!["".to_string(), "white".to_string()],
            ..Default::default()
        };
        assert_eq!(item.all_colors().collect::<Vec<_>>(), vec!["navy", "white"]);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&Category::Shoe).unwrap(), "\"shoe\"");
        assert_eq!(Category::Jacket.to_string(), "jacket");
    }
}
