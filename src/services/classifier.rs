use crate::models::{Category, WardrobeItem};

/// Ordered keyword rules; the first category with a matching keyword wins.
///
/// Outerwear comes first so layering pieces such as hoodies and cardigans
/// are treated as jackets for weather purposes even when stored as tops.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Jacket,
        &["hoodie", "sweater", "jacket", "coat", "blazer", "overcoat", "cardigan"],
    ),
    (
        Category::Top,
        &["top", "shirt", "tee", "blouse", "polo", "tank", "camisole"],
    ),
    (
        Category::Bottom,
        &["bottom", "jeans", "pants", "trousers", "shorts", "skirt", "chinos", "leggings"],
    ),
    (
        Category::Shoe,
        &["shoe", "sneaker", "boot", "sandal", "slide", "loafer", "heel"],
    ),
];

/// Lowercased text the keyword rules are matched against
fn search_text(item: &WardrobeItem) -> String {
    item.item_type
        .iter()
        .chain(item.category.iter())
        .chain(item.tags.iter())
        .map(|s| s.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_match(rules: &[(Category, &[&str])], text: &str) -> Option<Category> {
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
}

/// Classifies an item into its functional category
///
/// Outerwear keywords are checked across all text first. Otherwise the
/// stored category decides when it names one, so "high-top sneakers" filed
/// under shoes stays a shoe. Type and tags are the fallback.
pub fn classify(item: &WardrobeItem) -> Category {
    let text = search_text(item);
    let (outerwear, rest) = CATEGORY_RULES.split_at(1);

    if let Some(category) = first_match(outerwear, &text) {
        return category;
    }

    let hint = item.category.as_deref().map(str::to_lowercase);
    hint.and_then(|hint| first_match(rest, &hint))
        .or_else(|| first_match(rest, &text))
        .unwrap_or(Category::Other)
}
