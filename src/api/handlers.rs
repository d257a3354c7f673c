use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{FeedbackLabel, Location, Preferences, RecommendResponse, UserProfile, Weather};
use crate::services::RecommendInput;

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(alias = "outfitItems")]
    pub outfit_items: Vec<String>,
    pub label: FeedbackLabel,
}

fn require_user_id(user_id: &str) -> AppResult<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("user_id is required".to_string()));
    }
    Ok(trimmed)
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommends an outfit from the user's wardrobe
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let user_id = require_user_id(&request.user_id)?;
    let input = RecommendInput {
        weather: request.weather,
        location: request.location,
        preferences: request.preferences,
    };

    let response = state.recommender.recommend(user_id, input).await?;
    Ok(Json(response))
}

/// Lists the raw wardrobe records for a user
pub async fn get_wardrobe(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Value>>> {
    let user_id = require_user_id(&user_id)?;
    let records = state.wardrobes.fetch_wardrobe(user_id).await?;
    Ok(Json(records))
}

/// Adds one raw record to a user's wardrobe
pub async fn add_wardrobe_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(record): Json<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let user_id = require_user_id(&user_id)?;
    if !record.is_object() {
        return Err(AppError::InvalidInput(
            "wardrobe item must be a JSON object".to_string(),
        ));
    }

    state.wardrobes.add_item(user_id, record.clone()).await?;
    tracing::info!(user_id, "Wardrobe item added");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Returns the stored personalization profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let user_id = require_user_id(&user_id)?;
    let profile = state
        .profiles
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {user_id}")))?;
    Ok(Json(profile))
}

/// Records like/dislike feedback for a recommended outfit
pub async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> AppResult<Json<UserProfile>> {
    let user_id = require_user_id(&request.user_id)?;
    if request.outfit_items.is_empty() {
        return Err(AppError::InvalidInput("outfit_items must not be empty".to_string()));
    }

    let profile = state
        .recommender
        .feedback(user_id, &request.outfit_items, request.label)
        .await?;
    Ok(Json(profile))
}
