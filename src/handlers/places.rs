use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::place;
use crate::error::{AppError, AppResult};
use crate::proximity::{self, NearbyPlace, ViewportBounds, ViewportPlace};
use crate::store::DbPlaceStore;
use crate::utils::geo::Coordinate;
use crate::AppState;

// ============ Place CRUD ============

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaceRequest {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<place::Model> for PlaceResponse {
    fn from(model: place::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

fn validated_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Place name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

/// Create a place
pub async fn create_place(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlaceRequest>,
) -> AppResult<Json<PlaceResponse>> {
    let name = validated_name(&payload.name)?;
    Coordinate::new(payload.latitude, payload.longitude)?;

    let place = place::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        latitude: Set(payload.latitude),
        longitude: Set(payload.longitude),
        ..Default::default()
    };

    let result = place.insert(&state.db).await?;
    Ok(Json(result.into()))
}

/// List all places, newest first
pub async fn list_places(State(state): State<AppState>) -> AppResult<Json<Vec<PlaceResponse>>> {
    let places = place::Entity::find()
        .order_by_desc(place::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(places.into_iter().map(PlaceResponse::from).collect()))
}

/// Get a place by id
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PlaceResponse>> {
    let place = place::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Place not found".to_string()))?;

    Ok(Json(place.into()))
}

/// Update a place's name or coordinates
pub async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePlaceRequest>,
) -> AppResult<Json<PlaceResponse>> {
    let place = place::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Place not found".to_string()))?;

    // Validate the resulting pair even when only one axis changes
    let latitude = payload.latitude.unwrap_or(place.latitude);
    let longitude = payload.longitude.unwrap_or(place.longitude);
    Coordinate::new(latitude, longitude)?;

    let mut active: place::ActiveModel = place.into();

    if let Some(name) = payload.name {
        active.name = Set(validated_name(&name)?);
    }
    if payload.latitude.is_some() {
        active.latitude = Set(latitude);
    }
    if payload.longitude.is_some() {
        active.longitude = Set(longitude);
    }

    let result = active.update(&state.db).await?;
    Ok(Json(result.into()))
}

/// Delete a place
pub async fn delete_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = place::Entity::delete_by_id(id).exec(&state.db).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Place not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Place deleted" })))
}

// ============ Proximity Search ============

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    /// Search radius in kilometers; defaults to 5 km when omitted.
    pub radius: Option<f64>,
}

/// Places within a radius of a point, nearest first
pub async fn nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> AppResult<Json<Vec<NearbyPlace>>> {
    let store = DbPlaceStore::new(&state.db);
    let results = proximity::find_within_radius(&store, query.lat, query.lng, query.radius).await?;

    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
pub struct ViewportQuery {
    pub sw_lat: f64,
    pub sw_lng: f64,
    pub ne_lat: f64,
    pub ne_lng: f64,
    pub ref_lat: f64,
    pub ref_lng: f64,
}

/// Places inside a bounding box, ranked by distance from a reference point
pub async fn within_viewport(
    State(state): State<AppState>,
    Query(query): Query<ViewportQuery>,
) -> AppResult<Json<Vec<ViewportPlace>>> {
    let store = DbPlaceStore::new(&state.db);
    let bounds = ViewportBounds {
        sw_lat: query.sw_lat,
        sw_lng: query.sw_lng,
        ne_lat: query.ne_lat,
        ne_lng: query.ne_lng,
    };
    let results = proximity::find_in_viewport(&store, bounds, query.ref_lat, query.ref_lng).await?;

    Ok(Json(results))
}
