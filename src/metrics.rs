use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::auth::DepartmentRole;
use crate::entities::{hospital, sos_alert, Hospitals, SosAlerts, Users};
use crate::sos::{Priority, SosStatus};

pub async fn init_metrics(db: &DatabaseConnection) {
    let user_count = Users::find().count(db).await.unwrap_or(0);
    metrics::gauge!("bantay_users_total").set(user_count as f64);

    for status in SosStatus::ALL {
        let count = SosAlerts::find()
            .filter(sos_alert::Column::Status.eq(status.as_str()))
            .count(db)
            .await
            .unwrap_or(0);
        metrics::gauge!("bantay_sos_alerts", "status" => status.as_str()).set(count as f64);
    }

    let hospitals = Hospitals::find().all(db).await.unwrap_or_default();
    for h in &hospitals {
        record_hospital_beds(h);
    }

    tracing::info!(
        "Initialized metrics: Users={}, Hospitals={}",
        user_count,
        hospitals.len()
    );
}

pub fn record_user_registered() {
    metrics::counter!("bantay_users_registered_total").increment(1);
    metrics::gauge!("bantay_users_total").increment(1.0);
}

pub fn record_department_login(role: DepartmentRole) {
    metrics::counter!("bantay_department_logins_total", "role" => role.as_str()).increment(1);
}

pub fn record_sos_created(priority: Priority) {
    metrics::counter!("bantay_sos_alerts_created_total", "priority" => priority.as_str()).increment(1);
    metrics::gauge!("bantay_sos_alerts", "status" => SosStatus::Active.as_str()).increment(1.0);
}

pub fn record_sos_transition(from: SosStatus, to: SosStatus) {
    metrics::counter!("bantay_sos_transitions_total", "status" => to.as_str()).increment(1);
    metrics::gauge!("bantay_sos_alerts", "status" => from.as_str()).decrement(1.0);
    metrics::gauge!("bantay_sos_alerts", "status" => to.as_str()).increment(1.0);
}

pub fn record_response_time(seconds: f64) {
    metrics::histogram!("bantay_sos_dispatch_duration_seconds").record(seconds);
}

pub fn record_hospital_beds(h: &hospital::Model) {
    metrics::gauge!("bantay_hospital_available_beds", "hospital" => h.name.clone())
        .set(f64::from(h.available_beds));
}
