use crate::models::{Location, TemperatureBand, WardrobeItem, Weather};

/// Style tags that read well as an adjective in front of a garment
const STYLE_ADJECTIVES: &[&str] = &["relaxed", "casual", "fitted", "formal", "comfortable"];

pub const NO_WARDROBE_MESSAGE: &str =
    "No wardrobe items found yet. Add a few pieces to your closet to get outfit recommendations.";

fn style_adjective(item: &WardrobeItem) -> Option<&'static str> {
    item.tags
        .iter()
        .chain(item.style_vibe.iter())
        .find_map(|tag| {
            let tag = tag.trim().to_lowercase();
            STYLE_ADJECTIVES.iter().find(|a| **a == tag).copied()
        })
}

/// "relaxed white t-shirt", falling back to the stored category
fn describe(item: &WardrobeItem) -> String {
    let noun = item
        .item_type
        .as_deref()
        .or(item.category.as_deref())
        .unwrap_or("piece")
        .to_lowercase();

    let parts: Vec<String> = [
        style_adjective(item).map(str::to_string),
        item.primary_color.as_deref().map(str::to_lowercase),
        Some(noun),
    ]
    .into_iter()
    .flatten()
    .collect();

    parts.join(" ")
}

/// Joins phrases as "a, b and c"
fn join_phrases(phrases: &[String]) -> String {
    match phrases {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

fn context_clause(weather: &Weather, location: Option<&Location>) -> Option<String> {
    let place = location
        .and_then(|l| l.name.as_deref())
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let temp = weather.temp_f.filter(|t| t.is_finite());

    match (temp, place) {
        (Some(t), Some(p)) => Some(format!("For {t:.0}°F weather in {p}")),
        (Some(t), None) => Some(format!("For {t:.0}°F weather")),
        (None, Some(p)) => Some(format!("For today in {p}")),
        (None, None) => None,
    }
}

fn style_note(band: Option<TemperatureBand>) -> Option<&'static str> {
    band.map(|b| match b {
        TemperatureBand::Cold => "It's cold out, so this look prioritizes warmer layers.",
        TemperatureBand::Warm => "It's warm out, so this keeps things light and breathable.",
        TemperatureBand::Mild => "Mild temperatures call for a balanced look.",
    })
}

fn favorites_note(favorite_count: usize) -> Option<String> {
    match favorite_count {
        0 => None,
        1 => Some("It includes 1 of your favorites.".to_string()),
        n => Some(format!("It includes {n} of your favorites.")),
    }
}

/// Collapses whitespace and stray doubled punctuation
fn tidy(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut out = String::with_capacity(collapsed.len());
    for ch in collapsed.chars() {
        if matches!(ch, '.' | ',' | '!' | '?') {
            while out.ends_with(' ') {
                out.pop();
            }
            if out.ends_with(['.', ',', '!', '?']) {
                continue;
            }
        }
        out.push(ch);
    }
    out.trim().to_string()
}

/// Renders the rationale for a chosen outfit as one deterministic sentence
pub fn build_explanation(
    items: &[WardrobeItem],
    weather: &Weather,
    location: Option<&Location>,
    favorite_count: usize,
) -> String {
    if items.is_empty() {
        return NO_WARDROBE_MESSAGE.to_string();
    }

    let descriptions: Vec<String> = items.iter().map(describe).collect();
    let outfit = join_phrases(&descriptions);

    let lead = match context_clause(weather, location) {
        Some(clause) => format!("{clause}, we picked your {outfit}."),
        None => format!("We picked your {outfit}."),
    };

    let sentence = [
        Some(lead),
        style_note(weather.band()).map(str::to_string),
        favorites_note(favorite_count),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    tidy(&sentence)
}
