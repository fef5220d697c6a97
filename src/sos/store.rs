//! Alert persistence. One row per alert; every transition is a conditional
//! update on `version`.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::{sort_alerts, AlertCounts, Location, Priority, SosAlert, SosStatus, Transition};
use crate::entities::{sos_alert, SosAlerts};
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct NewSosAlert {
    pub user_id: Option<i32>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub contact_number: String,
    pub location: Location,
    pub details: String,
    pub priority: Priority,
}

impl NewSosAlert {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_name.trim().is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }
        if self.contact_number.trim().is_empty() {
            return Err(AppError::Validation("Contact number is required".into()));
        }
        let Location { lat, lng, .. } = self.location;
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::Validation(format!("Latitude out of range: {lat}")));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::Validation(format!("Longitude out of range: {lng}")));
        }
        Ok(())
    }
}

fn to_domain(model: sos_alert::Model) -> Result<SosAlert, AppError> {
    SosAlert::try_from(model).map_err(AppError::Internal)
}

pub async fn create(db: &DatabaseConnection, new: NewSosAlert) -> Result<SosAlert, AppError> {
    new.validate()?;

    let now = Utc::now().naive_utc();
    let active_model = sos_alert::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(new.user_id),
        user_name: Set(new.user_name.trim().to_string()),
        user_email: Set(new.user_email),
        contact_number: Set(new.contact_number.trim().to_string()),
        latitude: Set(new.location.lat),
        longitude: Set(new.location.lng),
        address: Set(new.location.address),
        details: Set(new.details),
        priority: Set(new.priority.as_str().to_string()),
        status: Set(SosStatus::Active.as_str().to_string()),
        version: Set(1),
        responded_by: Set(None),
        resolution: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    to_domain(active_model.insert(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<SosAlert, AppError> {
    match SosAlerts::find_by_id(id).one(db).await? {
        Some(model) => to_domain(model),
        None => Err(AppError::NotFound("Alert")),
    }
}

/// Alerts in dashboard order, optionally restricted to one status.
pub async fn list(db: &DatabaseConnection, status: Option<SosStatus>) -> Result<Vec<SosAlert>, AppError> {
    let mut query = SosAlerts::find().order_by_desc(sos_alert::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(sos_alert::Column::Status.eq(status.as_str()));
    }

    let mut alerts = query
        .all(db)
        .await?
        .into_iter()
        .map(to_domain)
        .collect::<Result<Vec<_>, _>>()?;
    sort_alerts(&mut alerts);
    Ok(alerts)
}

pub async fn list_for_user(db: &DatabaseConnection, user_id: i32) -> Result<Vec<SosAlert>, AppError> {
    SosAlerts::find()
        .filter(sos_alert::Column::UserId.eq(user_id))
        .order_by_desc(sos_alert::Column::CreatedAt)
        .all(db)
        .await?
        .into_iter()
        .map(to_domain)
        .collect()
}

pub async fn counts(db: &DatabaseConnection) -> Result<AlertCounts, AppError> {
    let alerts = list(db, None).await?;
    Ok(AlertCounts::tally(&alerts))
}

/// Applies a department action. `expected_version` is the version the caller
/// last saw; when absent the freshly read version is used.
pub async fn transition(
    db: &DatabaseConnection,
    id: Uuid,
    transition: Transition,
    expected_version: Option<i32>,
) -> Result<SosAlert, AppError> {
    let current = find(db, id).await?;
    let next = transition.target();

    if !current.status.can_transition_to(next) {
        return Err(AppError::InvalidTransition {
            from: current.status,
            to: next,
        });
    }

    let expected = expected_version.unwrap_or(current.version);
    if expected != current.version {
        return Err(stale(current.version));
    }

    let now = Utc::now().naive_utc();
    let mut updated = current.clone();
    updated.status = next;
    updated.version = expected + 1;
    updated.updated_at = now;

    let mut update = SosAlerts::update_many()
        .col_expr(sos_alert::Column::Status, Expr::value(next.as_str()))
        .col_expr(sos_alert::Column::Version, Expr::value(expected + 1))
        .col_expr(sos_alert::Column::UpdatedAt, Expr::value(now));

    match transition {
        Transition::Dispatch { responded_by } => {
            update = update.col_expr(sos_alert::Column::RespondedBy, Expr::value(responded_by.clone()));
            updated.responded_by = Some(responded_by);
        }
        Transition::Resolve { resolution } => {
            update = update.col_expr(sos_alert::Column::Resolution, Expr::value(resolution.clone()));
            updated.resolution = Some(resolution);
        }
        Transition::Cancel { reason: Some(reason) } => {
            update = update.col_expr(sos_alert::Column::Resolution, Expr::value(reason.clone()));
            updated.resolution = Some(reason);
        }
        Transition::Cancel { reason: None } => {}
    }

    let result = update
        .filter(sos_alert::Column::Id.eq(id))
        .filter(sos_alert::Column::Version.eq(expected))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(stale(expected));
    }

    Ok(updated)
}

fn stale(version: i32) -> AppError {
    AppError::Conflict(format!(
        "Alert changed since version {version}; refetch and retry"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sos::tests::at;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn row(id: Uuid, status: SosStatus, version: i32) -> sos_alert::Model {
        sos_alert::Model {
            id,
            user_id: Some(3),
            user_name: "Liza Soberano".into(),
            user_email: Some("liza@example.com".into()),
            contact_number: "09998887777".into(),
            latitude: 14.5764,
            longitude: 121.0851,
            address: Some("Pasig".into()),
            details: "Trapped on second floor".into(),
            priority: "critical".into(),
            status: status.as_str().into(),
            version,
            responded_by: None,
            resolution: None,
            created_at: at(4, 0),
            updated_at: at(4, 0),
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn dispatch_bumps_version_and_records_responder() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id, SosStatus::Active, 3)]])
            .append_exec_results([exec(1)])
            .into_connection();

        let updated = transition(
            &db,
            id,
            Transition::Dispatch {
                responded_by: "Coordinator (ERT)".into(),
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.status, SosStatus::Responding);
        assert_eq!(updated.version, 4);
        assert_eq!(updated.responded_by.as_deref(), Some("Coordinator (ERT)"));
    }

    #[tokio::test]
    async fn concurrent_writer_produces_conflict() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id, SosStatus::Responding, 2)]])
            .append_exec_results([exec(0)])
            .into_connection();

        let err = transition(
            &db,
            id,
            Transition::Resolve {
                resolution: "Rescued".into(),
            },
            Some(2),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn stale_client_version_is_rejected_before_writing() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id, SosStatus::Active, 5)]])
            .into_connection();

        let err = transition(&db, id, Transition::Cancel { reason: None }, Some(4))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn terminal_alert_cannot_be_reopened() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(id, SosStatus::Resolved, 4)]])
            .into_connection();

        let err = transition(
            &db,
            id,
            Transition::Dispatch {
                responded_by: "x".into(),
            },
            None,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidTransition {
                from: SosStatus::Resolved,
                to: SosStatus::Responding
            }
        ));
    }

    #[tokio::test]
    async fn missing_alert_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<sos_alert::Model>::new()])
            .into_connection();

        let err = find(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Alert")));
    }

    #[tokio::test]
    async fn list_applies_priority_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                sos_alert::Model {
                    priority: "medium".into(),
                    created_at: at(9, 0),
                    ..row(Uuid::new_v4(), SosStatus::Active, 1)
                },
                sos_alert::Model {
                    priority: "critical".into(),
                    created_at: at(3, 0),
                    ..row(Uuid::new_v4(), SosStatus::Active, 1)
                },
            ]])
            .into_connection();

        let alerts = list(&db, Some(SosStatus::Active)).await.unwrap();

        assert_eq!(alerts[0].priority, Priority::Critical);
        assert_eq!(alerts[1].priority, Priority::Medium);
    }

    fn new_alert() -> NewSosAlert {
        NewSosAlert {
            user_id: None,
            user_name: "Anonymous".into(),
            user_email: None,
            contact_number: "09170000000".into(),
            location: Location {
                lat: 14.55,
                lng: 121.02,
                address: None,
            },
            details: String::new(),
            priority: Priority::High,
        }
    }

    #[test]
    fn validation_checks_required_fields_and_coordinates() {
        assert!(new_alert().validate().is_ok());

        let mut blank_name = new_alert();
        blank_name.user_name = "  ".into();
        assert!(matches!(blank_name.validate(), Err(AppError::Validation(_))));

        let mut no_contact = new_alert();
        no_contact.contact_number = String::new();
        assert!(no_contact.validate().is_err());

        let mut bad_lat = new_alert();
        bad_lat.location.lat = 91.0;
        assert!(bad_lat.validate().is_err());

        let mut bad_lng = new_alert();
        bad_lng.location.lng = f64::NAN;
        assert!(bad_lng.validate().is_err());
    }
}
