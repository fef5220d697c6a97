use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use std::sync::Arc;

use crate::auth::CitizenSession;
use crate::error::AppError;
use crate::kv;
use super::extract::AppJson;

#[derive(Deserialize)]
pub struct LogActivityRequest {
    pub action: String,
    pub details: Option<Value>,
}

// POST /activity/log
pub async fn log_activity(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
    AppJson(payload): AppJson<LogActivityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.action.trim().is_empty() {
        return Err(AppError::Validation("Action is required".into()));
    }

    let entry_id = Uuid::new_v4();
    let entry = json!({
        "id": entry_id,
        "action": payload.action.trim(),
        "details": payload.details.unwrap_or(Value::Null),
        "timestamp": Utc::now().to_rfc3339(),
    });
    kv::set(&*db, &kv::activity_key(session.user_id, entry_id), entry.clone()).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// GET /activity/log
pub async fn list_activity(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
) -> Result<impl IntoResponse, AppError> {
    let entries: Vec<Value> = kv::get_by_prefix(&*db, &kv::activity_prefix(session.user_id))
        .await?
        .into_iter()
        .map(|row| row.value)
        .collect();
    Ok(Json(entries))
}
