use axum::{extract::Extension, response::IntoResponse, Json};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use std::sync::Arc;

use crate::disasters::DisasterStatus;
use crate::entities::{disaster, Disasters, Hospitals, Users};
use crate::error::AppError;
use crate::healthcare::{Capacity, HospitalStatus, HospitalSummary};
use crate::sos::store;

// GET /analytics/summary
pub async fn summary(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<impl IntoResponse, AppError> {
    let alerts = store::counts(&*db).await?;

    let mut hospitals = HospitalSummary::default();
    for h in Hospitals::find().all(&*db).await? {
        let status: HospitalStatus = h.status.parse().map_err(AppError::Internal)?;
        hospitals.add(
            status,
            &Capacity {
                total_beds: h.total_beds,
                available_beds: h.available_beds,
                emergency_capacity: h.emergency_capacity,
                icu_capacity: h.icu_capacity,
            },
        );
    }

    let active_disasters = Disasters::find()
        .filter(disaster::Column::Status.ne(DisasterStatus::Resolved.as_str()))
        .count(&*db)
        .await?;
    let registered_users = Users::find().count(&*db).await?;

    Ok(Json(json!({
        "sos": {
            "open": alerts.open(),
            "counts": alerts,
        },
        "hospitals": hospitals,
        "active_disasters": active_disasters,
        "registered_users": registered_users,
    })))
}
