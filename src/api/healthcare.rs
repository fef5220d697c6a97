use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;

use std::sync::Arc;

use crate::auth::{DepartmentRole, DepartmentSession};
use crate::entities::{hospital, Hospitals};
use crate::error::AppError;
use crate::healthcare::{Capacity, HospitalStatus};
use super::extract::{AppJson, AppPath};

const HOSPITAL_EDITORS: [DepartmentRole; 2] = [DepartmentRole::Healthcare, DepartmentRole::Lgu];

#[derive(Deserialize)]
pub struct CreateHospitalRequest {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub contact: String,
    #[serde(flatten)]
    pub capacity: Capacity,
    pub status: Option<HospitalStatus>,
}

#[derive(Deserialize)]
pub struct UpdateCapacityRequest {
    #[serde(flatten)]
    pub capacity: Capacity,
    pub status: Option<HospitalStatus>,
}

// GET /healthcare/hospitals
pub async fn list_hospitals(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, AppError> {
    let hospitals = Hospitals::find()
        .order_by_asc(hospital::Column::Name)
        .all(&*db)
        .await?;
    Ok(Json(hospitals))
}

// POST /healthcare/hospitals
pub async fn create_hospital(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<DepartmentSession>,
    AppJson(payload): AppJson<CreateHospitalRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_any(&HOSPITAL_EDITORS)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Hospital name is required".into()));
    }
    payload.capacity.validate()?;

    let now = Utc::now().naive_utc();
    let capacity = payload.capacity;
    let created = hospital::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        address: Set(payload.address),
        latitude: Set(payload.lat),
        longitude: Set(payload.lng),
        contact: Set(payload.contact),
        total_beds: Set(capacity.total_beds),
        available_beds: Set(capacity.available_beds),
        emergency_capacity: Set(capacity.emergency_capacity),
        icu_capacity: Set(capacity.icu_capacity),
        status: Set(payload
            .status
            .unwrap_or(HospitalStatus::Operational)
            .as_str()
            .to_string()),
        updated_by: Set(Some(session.signature())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&*db)
    .await?;

    tracing::Span::current()
        .record("table", "hospitals")
        .record("action", "create_hospital")
        .record("business_event", "Hospital registered");
    crate::metrics::record_hospital_beds(&created);

    Ok((StatusCode::CREATED, Json(created)))
}

// PATCH /healthcare/hospitals/:id/capacity
pub async fn update_capacity(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<DepartmentSession>,
    AppPath(hospital_id): AppPath<i32>,
    AppJson(payload): AppJson<UpdateCapacityRequest>,
) -> Result<impl IntoResponse, AppError> {
    session.require_any(&HOSPITAL_EDITORS)?;
    payload.capacity.validate()?;

    let existing = Hospitals::find_by_id(hospital_id)
        .one(&*db)
        .await?
        .ok_or(AppError::NotFound("Hospital"))?;

    let capacity = payload.capacity;
    let mut active = existing.into_active_model();
    active.total_beds = Set(capacity.total_beds);
    active.available_beds = Set(capacity.available_beds);
    active.emergency_capacity = Set(capacity.emergency_capacity);
    active.icu_capacity = Set(capacity.icu_capacity);
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().to_string());
    }
    active.updated_by = Set(Some(session.signature()));
    active.updated_at = Set(Utc::now().naive_utc());

    let updated = active.update(&*db).await?;

    tracing::Span::current()
        .record("table", "hospitals")
        .record("action", "update_capacity")
        .record("business_event", "Hospital capacity updated");
    info!(
        "Hospital {} capacity updated: {}/{} beds available ({:.0}% occupied)",
        updated.id,
        updated.available_beds,
        updated.total_beds,
        capacity.occupancy_percent()
    );
    crate::metrics::record_hospital_beds(&updated);

    Ok(Json(updated))
}
