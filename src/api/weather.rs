use axum::{response::IntoResponse, Json};

use crate::error::AppError;
use crate::weather::mock_report;
use super::extract::AppPath;

// GET /weather/:location
pub async fn get_weather(AppPath(location): AppPath<String>) -> Result<impl IntoResponse, AppError> {
    if location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".into()));
    }
    Ok(Json(mock_report(&location)))
}
