use crate::models::{PreferenceBreakdown, Preferences, UserProfile, WardrobeItem};

pub const OCCASION_EXACT: f64 = 2.0;
pub const OCCASION_PARTIAL: f64 = 1.0;
pub const STYLE_EXACT: f64 = 1.5;
pub const STYLE_PARTIAL: f64 = 0.75;
pub const STYLE_TAG_FALLBACK: f64 = 0.5;
pub const FAVORITE_BONUS: f64 = 1.0;
/// Applied once per item; outweighs every positive component combined
pub const AVOID_COLOR_PENALTY: f64 = -10.0;

pub const PROFILE_COLOR_WEIGHT: f64 = 0.3;
pub const PROFILE_FABRIC_WEIGHT: f64 = 0.25;
pub const PROFILE_FORMALITY_WEIGHT: f64 = 0.35;
pub const PROFILE_DISLIKED_PENALTY: f64 = -5.0;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Substring match in either direction
fn overlaps(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

fn occasion_component(item: &WardrobeItem, occasion: &str) -> f64 {
    let wanted = normalize(occasion);
    if wanted.is_empty() {
        return 0.0;
    }

    if item.occasion_tags.iter().any(|t| normalize(t) == wanted) {
        return OCCASION_EXACT;
    }

    if item
        .occasion_tags
        .iter()
        .chain(item.tags.iter())
        .any(|t| overlaps(&normalize(t), &wanted))
    {
        return OCCASION_PARTIAL;
    }

    0.0
}

fn style_component(item: &WardrobeItem, style_vibe: &str) -> f64 {
    let wanted = normalize(style_vibe);
    if wanted.is_empty() {
        return 0.0;
    }

    let vibes: Vec<String> = item.style_vibe.iter().map(|v| normalize(v)).collect();
    if vibes.iter().any(|v| *v == wanted) {
        return STYLE_EXACT;
    }
    if vibes.iter().any(|v| overlaps(v, &wanted)) {
        return STYLE_PARTIAL;
    }

    if item.tags.iter().any(|t| overlaps(&normalize(t), &wanted)) {
        return STYLE_TAG_FALLBACK;
    }

    0.0
}

fn avoid_component(item: &WardrobeItem, avoid_colors: &[String]) -> f64 {
    let avoided: Vec<String> = avoid_colors
        .iter()
        .map(|c| normalize(c))
        .filter(|c| !c.is_empty())
        .collect();

    let violates = item
        .all_colors()
        .map(normalize)
        .any(|color| avoided.iter().any(|a| overlaps(&color, a)));

    if violates {
        AVOID_COLOR_PENALTY
    } else {
        0.0
    }
}

/// Scores an item against request preferences
///
/// Absent preferences yield exactly zero for every component.
pub fn preference_score(
    item: &WardrobeItem,
    preferences: Option<&Preferences>,
) -> (f64, PreferenceBreakdown) {
    let Some(prefs) = preferences else {
        return (0.0, PreferenceBreakdown::default());
    };

    let breakdown = PreferenceBreakdown {
        occasion: prefs
            .occasion
            .as_deref()
            .map(|o| occasion_component(item, o))
            .unwrap_or(0.0),
        style: prefs
            .style_vibe
            .as_deref()
            .map(|s| style_component(item, s))
            .unwrap_or(0.0),
        favorite: if prefs.prefer_favorites && item.is_favorite {
            FAVORITE_BONUS
        } else {
            0.0
        },
        avoid_penalty: avoid_component(item, &prefs.avoid_colors),
    };

    (breakdown.total(), breakdown)
}

/// Affinity from the stored profile's long-term counters
///
/// Absent profile yields exactly zero.
pub fn profile_affinity(item: &WardrobeItem, profile: Option<&UserProfile>) -> f64 {
    let Some(profile) = profile else {
        return 0.0;
    };

    let mut score = 0.0;

    if let Some(color) = item.primary_color.as_deref() {
        score += PROFILE_COLOR_WEIGHT
            * profile
                .preferred_colors
                .get(&normalize(color))
                .copied()
                .unwrap_or(0.0);
    }
    if let Some(fabric) = item.fabric.as_deref() {
        score += PROFILE_FABRIC_WEIGHT
            * profile
                .preferred_fabrics
                .get(&normalize(fabric))
                .copied()
                .unwrap_or(0.0);
    }
    if let Some(formality) = item.formality.as_deref() {
        score += PROFILE_FORMALITY_WEIGHT
            * profile
                .preferred_formality
                .get(&normalize(formality))
                .copied()
                .unwrap_or(0.0);
    }
    if profile.disliked_item_ids.contains(&item.id) {
        score += PROFILE_DISLIKED_PENALTY;
    }

    score
}
