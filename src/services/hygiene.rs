//! Pre-selection gate for raw wardrobe records.
//!
//! Records are checked in a fixed order and the first failing rule decides
//! the rejection reason. The filter never fails a request: when nothing
//! survives, callers fall back to the unfiltered records.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

/// Structural categories a record must declare to be usable
const ALLOWED_CATEGORIES: &[&str] = &["top", "bottom", "shoes"];

const IMAGE_URL_FIELDS: &[&str] = &["cleanImageUrl", "clean_image_url", "imageUrl", "image_url"];

const DUMMY_IMAGE_MARKERS: &[&str] = &[
    "placeholder",
    "dummy",
    "sample",
    "example",
    "test_image",
    "no_image",
    "image_coming_soon",
    "your_image_here",
];

/// Why a raw record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HygieneRejection {
    #[error("invalid_category")]
    InvalidCategory,
    #[error("missing_image_url")]
    MissingImageUrl,
    #[error("dummy_image")]
    DummyImage,
    #[error("host_local")]
    HostLocal,
    #[error("invalid_url")]
    InvalidUrl,
}

/// Aggregate counts from one filtering pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HygieneReport {
    pub total: usize,
    pub usable: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_reason: BTreeMap<HygieneRejection, usize>,
}

fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}

fn image_url(record: &Value) -> Option<&str> {
    IMAGE_URL_FIELDS
        .iter()
        .filter_map(|key| str_field(record, key))
        .map(str::trim)
        .find(|url| !url.is_empty())
}

fn is_local_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1" || host.starts_with("192.168.")
}

/// Checks whether a raw record is usable for automated selection
pub fn check(record: &Value) -> Result<(), HygieneRejection> {
    let category = str_field(record, "category")
        .map(|c| c.trim().to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_CATEGORIES.contains(&category.as_str()) {
        return Err(HygieneRejection::InvalidCategory);
    }

    let url = image_url(record).ok_or(HygieneRejection::MissingImageUrl)?;

    let lowered = url.to_lowercase();
    if DUMMY_IMAGE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Err(HygieneRejection::DummyImage);
    }

    let parsed = Url::parse(url).map_err(|_| HygieneRejection::InvalidUrl)?;
    match parsed.host_str() {
        Some(host) if is_local_host(host) => Err(HygieneRejection::HostLocal),
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(HygieneRejection::InvalidUrl),
    }
}

/// Splits raw records into usable ones and reports aggregate statistics
pub fn filter_usable(records: &[Value]) -> (Vec<Value>, HygieneReport) {
    let mut report = HygieneReport {
        total: records.len(),
        ..Default::default()
    };
    let mut usable = Vec::new();

    for record in records {
        let category = str_field(record, "category")
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        *report.by_category.entry(category).or_insert(0) += 1;

        match check(record) {
            Ok(()) => usable.push(record.clone()),
            Err(reason) => {
                tracing::debug!(
                    item_id = ?record.get("id").or_else(|| record.get("_id")),
                    reason = %reason,
                    "Record rejected by hygiene filter"
                );
                *report.by_reason.entry(reason).or_insert(0) += 1;
            }
        }
    }

    report.usable = usable.len();

    tracing::info!(
        total = report.total,
        usable = report.usable,
        by_category = ?report.by_category,
        by_reason = ?report.by_reason,
        "Hygiene filter applied"
    );

    (usable, report)
}

/// Filters records, falling back to the full set when nothing is usable
pub fn usable_or_all(records: Vec<Value>) -> (Vec<Value>, HygieneReport) {
    let (usable, report) = filter_usable(&records);

    if usable.is_empty() && !records.is_empty() {
        tracing::warn!(
            total = records.len(),
            "No records passed the hygiene filter, using unfiltered wardrobe"
        );
        return (records, report);
    }

    (usable, report)
}
