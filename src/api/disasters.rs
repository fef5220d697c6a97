use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;

use std::sync::Arc;

use crate::auth::{DepartmentRole, DepartmentSession};
use crate::disasters::{DisasterStatus, DisasterType, Severity};
use crate::entities::{disaster, Disasters};
use crate::error::AppError;
use super::extract::{AppJson, AppPath};

const DISASTER_EDITORS: [DepartmentRole; 2] = [DepartmentRole::DisasterManagement, DepartmentRole::Lgu];

#[derive(Deserialize)]
pub struct CreateDisasterRequest {
    pub disaster_type: DisasterType,
    pub name: String,
    pub severity: Severity,
    #[serde(default)]
    pub affected_areas: Vec<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateDisasterStatusRequest {
    pub status: DisasterStatus,
    pub severity: Option<Severity>,
}

// GET /disasters/active
pub async fn list_active(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, AppError> {
    let ongoing = [DisasterStatus::Active, DisasterStatus::Monitoring]
        .iter()
        .map(|s| s.as_str());
    let events = Disasters::find()
        .filter(disaster::Column::Status.is_in(ongoing))
        .order_by_desc(disaster::Column::StartedAt)
        .all(&*db)
        .await?;
    Ok(Json(events))
}

// POST /disasters
pub async fn create_disaster(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<DepartmentSession>,
    AppJson(payload): AppJson<CreateDisasterRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_any(&DISASTER_EDITORS)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Disaster name is required".into()));
    }

    let now = Utc::now().naive_utc();
    let event = disaster::ActiveModel {
        id: Set(Uuid::new_v4()),
        disaster_type: Set(payload.disaster_type.as_str().to_string()),
        name: Set(payload.name.trim().to_string()),
        severity: Set(payload.severity.as_str().to_string()),
        status: Set(DisasterStatus::Active.as_str().to_string()),
        affected_areas: Set(serde_json::json!(payload.affected_areas)),
        description: Set(payload.description),
        started_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&*db)
    .await?;

    tracing::Span::current()
        .record("table", "disasters")
        .record("action", "create_disaster")
        .record("business_event", "Disaster event declared");

    Ok((StatusCode::CREATED, Json(event)))
}

// PATCH /disasters/:id/status
pub async fn update_status(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<DepartmentSession>,
    AppPath(disaster_id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateDisasterStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_any(&DISASTER_EDITORS)?;

    let existing = Disasters::find_by_id(disaster_id)
        .one(&*db)
        .await?
        .ok_or(AppError::NotFound("Disaster"))?;

    let mut active = existing.into_active_model();
    active.status = Set(payload.status.as_str().to_string());
    if let Some(severity) = payload.severity {
        active.severity = Set(severity.as_str().to_string());
    }
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&*db).await?;

    tracing::Span::current()
        .record("table", "disasters")
        .record("action", "update_disaster_status")
        .record("business_event", "Disaster status changed");

    Ok(Json(updated))
}
