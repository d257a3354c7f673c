use std::collections::{HashMap, HashSet};

use crate::models::{CandidateOutfit, Category, ScoredItem, TemperatureBand};

/// Items taken from each category before crossing, keeps at most 16 candidates
pub const SHORTLIST_SIZE: usize = 2;
/// Items returned when no category-aware outfit can be formed
pub const LAST_RESORT_SIZE: usize = 3;

/// Scored items grouped by category, each group in insertion order
pub type ScoredByCategory = HashMap<Category, Vec<ScoredItem>>;

/// Groups scored items by category, preserving their original order
pub fn group_by_category(items: Vec<ScoredItem>) -> ScoredByCategory {
    let mut grouped = ScoredByCategory::new();
    for item in items {
        grouped.entry(item.category).or_default().push(item);
    }
    grouped
}

/// Ranks a group clean-first, then by score, highest first
///
/// Shortlists are cut from this order, so an item on the avoid-list never
/// displaces a clean one however the scores compare. The sort is stable so
/// equal scores keep insertion order.
fn ranked(items: &[ScoredItem]) -> Vec<&ScoredItem> {
    let mut ranked: Vec<&ScoredItem> = items.iter().collect();
    ranked.sort_by(|a, b| {
        a.violates_avoid_colors()
            .cmp(&b.violates_avoid_colors())
            .then_with(|| b.score.total_cmp(&a.score))
    });
    ranked
}

fn has_unique_ids(items: &[&ScoredItem]) -> bool {
    let mut seen = HashSet::new();
    items.iter().all(|i| seen.insert(i.id()))
}

/// Slots that make up a full outfit; a jacket layer joins only when cold and one exists
fn outfit_slots(scored: &ScoredByCategory, temp_f: Option<f64>) -> Vec<Category> {
    let mut slots = vec![Category::Top, Category::Bottom, Category::Shoe];
    let cold = temp_f.and_then(TemperatureBand::from_fahrenheit) == Some(TemperatureBand::Cold);
    let has_jacket = scored.get(&Category::Jacket).is_some_and(|j| !j.is_empty());
    if cold && has_jacket {
        slots.push(Category::Jacket);
    }
    slots
}

/// Builds every combination of the per-slot shortlists
fn candidates<'a>(shortlists: &[Vec<&'a ScoredItem>]) -> Vec<CandidateOutfit<'a>> {
    let mut combos: Vec<Vec<&'a ScoredItem>> = vec![Vec::new()];

    for shortlist in shortlists {
        combos = combos
            .into_iter()
            .flat_map(|combo| {
                shortlist.iter().map(move |item| {
                    let mut next = combo.clone();
                    next.push(*item);
                    next
                })
            })
            .collect();
    }

    combos
        .into_iter()
        .filter(|combo| !combo.is_empty() && has_unique_ids(combo))
        .map(CandidateOutfit::new)
        .collect()
}

/// Picks the best candidate: clean outfits first, then highest score
///
/// Candidates are stably ordered so ties keep generation order.
fn select_best<'a>(mut candidates: Vec<CandidateOutfit<'a>>) -> Option<CandidateOutfit<'a>> {
    candidates.sort_by(|a, b| {
        a.has_avoided_color
            .cmp(&b.has_avoided_color)
            .then_with(|| b.score.total_cmp(&a.score))
    });
    candidates.into_iter().next()
}

/// Best item per slot, skipping slots with no items
fn greedy<'a>(ranked_by_slot: &[Vec<&'a ScoredItem>]) -> Vec<&'a ScoredItem> {
    let mut chosen: Vec<&'a ScoredItem> = Vec::new();
    for ranked in ranked_by_slot {
        if let Some(best) = ranked.iter().find(|i| chosen.iter().all(|c| c.id() != i.id())) {
            chosen.push(*best);
        }
    }
    chosen
}

/// Highest scoring items regardless of category
fn last_resort(scored: &ScoredByCategory) -> Vec<&ScoredItem> {
    let mut all: Vec<&ScoredItem> = Vec::new();
    for category in [
        Category::Top,
        Category::Bottom,
        Category::Shoe,
        Category::Jacket,
        Category::Other,
    ] {
        if let Some(items) = scored.get(&category) {
            all.extend(items.iter());
        }
    }
    all.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen = HashSet::new();
    all.into_iter()
        .filter(|i| seen.insert(i.id()))
        .take(LAST_RESORT_SIZE)
        .collect()
}

/// Assembles the chosen outfit from scored items
///
/// Returns an empty list only when there are no scored items at all.
pub fn assemble(scored: &ScoredByCategory, temp_f: Option<f64>) -> Vec<ScoredItem> {
    let slots = outfit_slots(scored, temp_f);

    let ranked_by_slot: Vec<Vec<&ScoredItem>> = slots
        .iter()
        .map(|slot| scored.get(slot).map(|items| ranked(items)).unwrap_or_default())
        .collect();

    let complete = ranked_by_slot.iter().all(|r| !r.is_empty());
    if complete {
        let shortlists: Vec<Vec<&ScoredItem>> = ranked_by_slot
            .iter()
            .map(|r| r.iter().take(SHORTLIST_SIZE).copied().collect())
            .collect();

        let pool = candidates(&shortlists);
        let pool_size = pool.len();
        let clean = pool.iter().filter(|c| !c.has_avoided_color).count();

        if let Some(best) = select_best(pool) {
            tracing::debug!(
                candidates = pool_size,
                clean_candidates = clean,
                score = best.score,
                has_avoided_color = best.has_avoided_color,
                "Selected best candidate outfit"
            );
            if best.has_avoided_color {
                tracing::info!("No clean candidate outfit, returning best available");
            }
            return best.items.into_iter().cloned().collect();
        }
    }

    let chosen = greedy(&ranked_by_slot);
    if !chosen.is_empty() {
        tracing::debug!(items = chosen.len(), "Assembled outfit greedily");
        return chosen.into_iter().cloned().collect();
    }

    let fallback = last_resort(scored);
    if !fallback.is_empty() {
        tracing::debug!(items = fallback.len(), "Assembled outfit from top items overall");
    }
    fallback.into_iter().cloned().collect()
}
