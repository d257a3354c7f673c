use crate::models::{Category, TemperatureBand, WardrobeItem, Weather};

use super::classifier::classify;

/// Neutral starting score
pub const BASELINE: f64 = 0.0;
pub const FAVORITE_BONUS: f64 = 0.5;
pub const SEASON_MATCH: f64 = 1.0;
pub const SEASON_MISMATCH: f64 = -1.0;
pub const SHOULDER_SEASON_MATCH: f64 = 0.5;
pub const RAIN_CANVAS_PENALTY: f64 = -1.0;
/// Precipitation chance, in percent, from which rain is assumed
pub const RAIN_LIKELY_PERCENT: f64 = 50.0;

const HEAVY_TOPS: &[&str] = &[
    "hoodie", "sweater", "jacket", "cardigan", "fleece", "thermal", "turtleneck", "flannel",
    "sweatshirt",
];
const LIGHT_TOPS: &[&str] = &["t-shirt", "shirt", "polo", "tank", "camisole"];
const FULL_LENGTH_BOTTOMS: &[&str] = &["jeans", "trousers", "pants"];
const SANDALS: &[&str] = &["sandal", "slide"];

const COLD_SEASON_TAGS: &[&str] = &["winter", "cold"];
const WARM_SEASON_TAGS: &[&str] = &["summer", "hot"];
const SHOULDER_SEASON_TAGS: &[&str] = &["spring", "fall", "autumn"];
const RAIN_KEYWORDS: &[&str] = &["rain", "drizzle", "shower", "storm"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn has_tag(tags: &[String], wanted: &[&str]) -> bool {
    tags.iter()
        .any(|t| wanted.iter().any(|w| t.trim().eq_ignore_ascii_case(w)))
}

fn top_adjustment(item_type: &str, band: TemperatureBand) -> f64 {
    use TemperatureBand::*;
    if contains_any(item_type, HEAVY_TOPS) {
        return match band {
            Cold => 1.0,
            Mild => 0.0,
            Warm => -1.0,
        };
    }
    if contains_any(item_type, LIGHT_TOPS) {
        return match band {
            Cold => -1.0,
            Mild => 0.0,
            Warm => 1.0,
        };
    }
    0.0
}

fn bottom_adjustment(item_type: &str, band: TemperatureBand) -> f64 {
    use TemperatureBand::*;
    if item_type.contains("shorts") {
        return match band {
            Cold => -2.0,
            Mild => 0.0,
            Warm => 1.0,
        };
    }
    if contains_any(item_type, FULL_LENGTH_BOTTOMS) {
        return match band {
            Cold | Mild => 0.5,
            Warm => 0.0,
        };
    }
    0.0
}

fn shoe_adjustment(item_type: &str, band: TemperatureBand) -> f64 {
    use TemperatureBand::*;
    if item_type.contains("sneaker") {
        return 0.5;
    }
    if item_type.contains("boot") {
        return match band {
            Cold => 1.0,
            Mild => 0.0,
            Warm => -1.0,
        };
    }
    if contains_any(item_type, SANDALS) {
        return match band {
            Cold => -1.5,
            Mild => 0.0,
            Warm => 1.0,
        };
    }
    0.0
}

fn jacket_adjustment(band: TemperatureBand) -> f64 {
    match band {
        TemperatureBand::Cold => 2.0,
        TemperatureBand::Mild => 0.5,
        TemperatureBand::Warm => -2.0,
    }
}

fn season_adjustment(season_tags: &[String], band: TemperatureBand) -> f64 {
    let cold_tag = has_tag(season_tags, COLD_SEASON_TAGS);
    let warm_tag = has_tag(season_tags, WARM_SEASON_TAGS);

    match band {
        TemperatureBand::Cold => {
            let mut score = 0.0;
            if cold_tag {
                score += SEASON_MATCH;
            }
            if warm_tag {
                score += SEASON_MISMATCH;
            }
            score
        }
        TemperatureBand::Warm => {
            let mut score = 0.0;
            if warm_tag {
                score += SEASON_MATCH;
            }
            if cold_tag {
                score += SEASON_MISMATCH;
            }
            score
        }
        TemperatureBand::Mild if has_tag(season_tags, SHOULDER_SEASON_TAGS) => {
            SHOULDER_SEASON_MATCH
        }
        TemperatureBand::Mild => 0.0,
    }
}

/// Rain named in the summary, or a high enough precipitation chance
fn rain_likely(weather: &Weather) -> bool {
    let named = weather
        .summary
        .as_deref()
        .is_some_and(|s| contains_any(&s.to_lowercase(), RAIN_KEYWORDS));
    let forecast = weather
        .precip_chance
        .is_some_and(|p| p.is_finite() && p >= RAIN_LIKELY_PERCENT);
    named || forecast
}

fn rain_adjustment(item: &WardrobeItem, category: Category, weather: &Weather) -> f64 {
    let raining = rain_likely(weather);
    let canvas = item
        .fabric
        .as_deref()
        .map(|f| f.to_lowercase().contains("canvas"))
        .unwrap_or(false);

    if raining && canvas && category == Category::Shoe {
        RAIN_CANVAS_PENALTY
    } else {
        0.0
    }
}

/// Scores one item's fitness for the current weather
///
/// Adjustments are additive on top of [`BASELINE`]. Missing temperature,
/// season tags or fabric contribute nothing rather than failing.
pub fn weather_score(item: &WardrobeItem, weather: &Weather) -> f64 {
    let category = classify(item);
    let item_type = item.type_lower();
    let mut score = BASELINE;

    if let Some(band) = weather.band() {
        score += match category {
            Category::Top => top_adjustment(&item_type, band),
            Category::Bottom => bottom_adjustment(&item_type, band),
            Category::Shoe => shoe_adjustment(&item_type, band),
            Category::Jacket => jacket_adjustment(band),
            Category::Other => 0.0,
        };
        score += season_adjustment(&item.season_tags, band);
    }

    score += rain_adjustment(item, category, weather);

    if item.is_favorite {
        score += FAVORITE_BONUS;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_type: &str, category: &str) -> WardrobeItem {
        WardrobeItem {
            id: item_type.to_string(),
            item_type: Some(item_type.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn at(temp_f: f64) -> Weather {
        Weather::new(temp_f, None)
    }

    #[test]
    fn test_light_tops_favor_warm_weather() {
        let tee = item("t-shirt", "top");
        assert!(weather_score(&tee, &at(90.0)) > weather_score(&tee, &at(40.0)));
        assert_eq!(weather_score(&tee, &at(90.0)), 1.0);
        assert_eq!(weather_score(&tee, &at(40.0)), -1.0);
    }

    #[test]
    fn test_heavy_top_checked_before_light_keywords() {
        let flannel = item("flannel shirt", "top");
        assert_eq!(weather_score(&flannel, &at(40.0)), 1.0);
        assert_eq!(weather_score(&flannel, &at(90.0)), -1.0);
    }

    #[test]
    fn test_sweatshirt_is_not_a_light_shirt() {
        let sweatshirt = item("sweatshirt", "top");
        assert_eq!(weather_score(&sweatshirt, &at(40.0)), 1.0);
        assert_eq!(weather_score(&sweatshirt, &at(90.0)), -1.0);
    }

    #[test]
    fn test_shorts_penalized_sharply_in_cold() {
        let shorts = item("shorts", "bottom");
        let jeans = item("jeans", "bottom");
        assert_eq!(weather_score(&shorts, &at(30.0)), -2.0);
        assert!(weather_score(&jeans, &at(30.0)) > weather_score(&shorts, &at(30.0)));
        assert!(weather_score(&shorts, &at(85.0)) > weather_score(&jeans, &at(85.0)));
    }

    #[test]
    fn test_shoes() {
        let sneakers = item("sneakers", "shoes");
        let boots = item("boots", "shoes");
        let sandals = item("sandals", "shoes");
        assert_eq!(weather_score(&sneakers, &at(40.0)), 0.5);
        assert_eq!(weather_score(&sneakers, &at(90.0)), 0.5);
        assert!(weather_score(&boots, &at(40.0)) > weather_score(&sandals, &at(40.0)));
        assert!(weather_score(&sandals, &at(90.0)) > weather_score(&boots, &at(90.0)));
    }

    #[test]
    fn test_jacket_effect_stronger_than_top_effect() {
        let jacket = item("jacket", "top");
        let sweaterless_top = item("shirt", "top");
        assert_eq!(weather_score(&jacket, &at(40.0)), 2.0);
        assert!(weather_score(&jacket, &at(40.0)).abs() > weather_score(&sweaterless_top, &at(40.0)).abs());
        assert_eq!(weather_score(&jacket, &at(65.0)), 0.5);
        assert_eq!(weather_score(&jacket, &at(90.0)), -2.0);
    }

    #[test]
    fn test_season_tags() {
        let mut coat = item("coat", "top");
        coat.season_tags = vec!["Winter".to_string()];
        assert_eq!(weather_score(&coat, &at(40.0)), 3.0);
        assert_eq!(weather_score(&coat, &at(90.0)), -3.0);

        let mut tee = item("t-shirt", "top");
        tee.season_tags = vec!["summer".to_string()];
        assert_eq!(weather_score(&tee, &at(40.0)), -2.0);

        let mut chinos = item("chinos", "bottom");
        chinos.season_tags = vec!["spring".to_string()];
        assert_eq!(weather_score(&chinos, &at(65.0)), SHOULDER_SEASON_MATCH);
    }

    #[test]
    fn test_rain_penalizes_canvas_shoes_only() {
        let mut canvas = item("plimsolls", "shoes");
        canvas.fabric = Some("Canvas".to_string());
        let rainy = Weather::new(65.0, Some("Light Rain"));
        assert_eq!(weather_score(&canvas, &rainy), RAIN_CANVAS_PENALTY);

        let dry = Weather::new(65.0, Some("overcast"));
        assert_eq!(weather_score(&canvas, &dry), 0.0);

        let mut tote = item("scarf", "accessory");
        tote.fabric = Some("canvas".to_string());
        assert_eq!(weather_score(&tote, &rainy), 0.0);
    }

    #[test]
    fn test_precip_chance_counts_as_rain() {
        let mut canvas = item("plimsolls", "shoes");
        canvas.fabric = Some("canvas".to_string());

        let mut forecast = Weather::new(65.0, Some("cloudy"));
        forecast.precip_chance = Some(60.0);
        assert_eq!(weather_score(&canvas, &forecast), RAIN_CANVAS_PENALTY);

        forecast.precip_chance = Some(20.0);
        assert_eq!(weather_score(&canvas, &forecast), 0.0);

        forecast.precip_chance = Some(f64::NAN);
        assert_eq!(weather_score(&canvas, &forecast), 0.0);
    }

    #[test]
    fn test_favorite_bonus_is_weather_independent() {
        let mut scarf = item("scarf", "accessory");
        assert_eq!(weather_score(&scarf, &Weather::default()), BASELINE);
        scarf.is_favorite = true;
        assert_eq!(weather_score(&scarf, &Weather::default()), FAVORITE_BONUS);
        assert_eq!(weather_score(&scarf, &at(90.0)), FAVORITE_BONUS);
    }

    #[test]
    fn test_missing_temperature_is_neutral() {
        let jacket = item("jacket", "top");
        assert_eq!(weather_score(&jacket, &Weather::default()), BASELINE);
    }
}
