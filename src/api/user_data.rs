use axum::{extract::Extension, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use std::sync::Arc;

use crate::auth::CitizenSession;
use crate::error::AppError;
use crate::kv;
use super::extract::AppJson;

// GET /user/data
pub async fn get_user_data(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
) -> Result<impl IntoResponse, AppError> {
    let data = kv::get(&*db, &kv::user_data_key(session.user_id))
        .await?
        .unwrap_or_else(|| json!({}));
    Ok(Json(json!({"data": data})))
}

// POST /user/data - replaces the whole document
pub async fn save_user_data(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
    AppJson(payload): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    if !payload.is_object() {
        return Err(AppError::Validation("User data must be a JSON object".into()));
    }

    kv::set(&*db, &kv::user_data_key(session.user_id), payload).await?;

    tracing::Span::current()
        .record("table", "kv_store")
        .record("action", "save_user_data")
        .record("business_event", "User data saved");

    Ok(Json(json!({"message": "User data saved"})))
}

// DELETE /user/data
pub async fn delete_user_data(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
) -> Result<impl IntoResponse, AppError> {
    let removed = kv::delete(&*db, &kv::user_data_key(session.user_id)).await?;

    tracing::Span::current()
        .record("table", "kv_store")
        .record("action", "delete_user_data");

    Ok(Json(json!({"deleted": removed})))
}
