use axum::{response::IntoResponse, Json};
use serde::Deserialize;

use crate::error::AppError;
use crate::evacuation::{self, EVACUATION_CENTERS};
use super::extract::AppQuery;

const DEFAULT_LIMIT: usize = 5;

#[derive(Deserialize)]
pub struct ListQuery {
    pub city: Option<String>,
}

#[derive(Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lng: f64,
    pub limit: Option<usize>,
}

// GET /evacuation-centers?city=
pub async fn list_centers(AppQuery(query): AppQuery<ListQuery>) -> impl IntoResponse {
    match query.city {
        Some(city) => Json(evacuation::in_city(&city)),
        None => Json(EVACUATION_CENTERS.to_vec()),
    }
}

// GET /evacuation-centers/nearest?lat=&lng=&limit=
pub async fn nearest_centers(AppQuery(query): AppQuery<NearestQuery>) -> Result<impl IntoResponse, AppError> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lng) {
        return Err(AppError::Validation("Coordinates out of range".into()));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    Ok(Json(evacuation::nearest(query.lat, query.lng, limit)))
}
