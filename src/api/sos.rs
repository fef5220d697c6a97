use axum::{
    body::Bytes,
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use chrono::Utc;
use futures::Stream;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{middleware::citizen_from_headers, CitizenSession, DepartmentRole, DepartmentSession, TokenKeys};
use crate::error::AppError;
use crate::events::{EventHub, SosEventKind};
use crate::sos::{
    store::{self, NewSosAlert},
    Location, Priority, SosAlert, SosStatus, Transition,
};
use super::extract::{AppJson, AppPath, AppQuery};

const RESPONDER_ROLES: [DepartmentRole; 2] = [DepartmentRole::Lgu, DepartmentRole::EmergencyResponder];

#[derive(Deserialize)]
pub struct CreateSosRequest {
    pub user_name: String,
    pub user_email: Option<String>,
    pub contact_number: String,
    pub location: Location,
    #[serde(default)]
    pub details: String,
    pub priority: Option<Priority>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<SosStatus>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TransitionRequest {
    /// Version the dashboard last saw.
    pub version: Option<i32>,
    pub resolution: Option<String>,
    pub reason: Option<String>,
}

impl TransitionRequest {
    /// An empty body means no version, resolution or reason. Anything else
    /// must parse.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
    }
}

fn record_alert(action: &str, alert: &SosAlert) {
    tracing::Span::current()
        .record("table", "sos_alerts")
        .record("action", action)
        .record("alert_id", tracing::field::display(alert.id));
}

// POST /sos/create - citizens, signed in or not
pub async fn create_alert(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(keys): Extension<Arc<TokenKeys>>,
    Extension(hub): Extension<EventHub>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateSosRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = citizen_from_headers(&headers, &keys);

    let new_alert = NewSosAlert {
        user_id: session.as_ref().map(|s| s.user_id),
        user_email: payload
            .user_email
            .or_else(|| session.as_ref().map(|s| s.email.clone())),
        user_name: payload.user_name,
        contact_number: payload.contact_number,
        location: payload.location,
        details: payload.details,
        priority: payload.priority.unwrap_or(Priority::High),
    };

    let alert = store::create(&*db, new_alert).await?;

    record_alert("create_sos", &alert);
    tracing::Span::current().record("business_event", "SOS alert raised");
    info!("SOS alert {} raised with priority {}", alert.id, alert.priority);
    crate::metrics::record_sos_created(alert.priority);
    hub.publish(SosEventKind::Created, alert.clone());

    Ok((StatusCode::CREATED, Json(alert)))
}

// GET /sos/alerts?status=active
pub async fn list_alerts(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let alerts = store::list(&*db, query.status).await?;
    Ok(Json(alerts))
}

// GET /sos/alerts/:id
pub async fn get_alert(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    AppPath(alert_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store::find(&*db, alert_id).await?))
}

// GET /sos/mine
pub async fn list_my_alerts(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(session): Extension<CitizenSession>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store::list_for_user(&*db, session.user_id).await?))
}

async fn apply_transition(
    db: &DatabaseConnection,
    hub: &EventHub,
    session: &DepartmentSession,
    alert_id: Uuid,
    transition: Transition,
    version: Option<i32>,
) -> Result<SosAlert, AppError> {
    session.require_any(&RESPONDER_ROLES)?;

    let target = transition.target();
    let alert = match store::transition(db, alert_id, transition, version).await {
        Ok(alert) => alert,
        Err(e) => {
            tracing::Span::current()
                .record("table", "sos_alerts")
                .record("action", "transition_failed")
                .record("error", tracing::field::display(&e));
            return Err(e);
        }
    };

    record_alert(target.as_str(), &alert);
    tracing::Span::current().record("business_event", "SOS alert status changed");
    info!("SOS alert {} is now {} (version {})", alert.id, alert.status, alert.version);

    let previous = match target {
        SosStatus::Resolved => SosStatus::Responding,
        _ => SosStatus::Active,
    };
    crate::metrics::record_sos_transition(previous, target);
    if target == SosStatus::Responding {
        let waited = Utc::now().naive_utc() - alert.created_at;
        crate::metrics::record_response_time(waited.num_milliseconds() as f64 / 1000.0);
    }

    hub.publish(SosEventKind::Updated, alert.clone());
    Ok(alert)
}

// POST /sos/alerts/:id/dispatch
pub async fn dispatch_alert(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(hub): Extension<EventHub>,
    Extension(session): Extension<DepartmentSession>,
    AppPath(alert_id): AppPath<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = TransitionRequest::from_body(&body)?;
    let transition = Transition::Dispatch {
        responded_by: session.signature(),
    };
    let alert = apply_transition(&*db, &hub, &session, alert_id, transition, request.version).await?;
    Ok(Json(alert))
}

// POST /sos/alerts/:id/resolve
pub async fn resolve_alert(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(hub): Extension<EventHub>,
    Extension(session): Extension<DepartmentSession>,
    AppPath(alert_id): AppPath<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = TransitionRequest::from_body(&body)?;
    let resolution = request
        .resolution
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "Resolved".to_string());
    let transition = Transition::Resolve { resolution };
    let alert = apply_transition(&*db, &hub, &session, alert_id, transition, request.version).await?;
    Ok(Json(alert))
}

// POST /sos/alerts/:id/cancel
pub async fn cancel_alert(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(hub): Extension<EventHub>,
    Extension(session): Extension<DepartmentSession>,
    AppPath(alert_id): AppPath<Uuid>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request = TransitionRequest::from_body(&body)?;
    let transition = Transition::Cancel {
        reason: request.reason.filter(|r| !r.trim().is_empty()),
    };
    let alert = apply_transition(&*db, &hub, &session, alert_id, transition, request.version).await?;
    Ok(Json(alert))
}

// GET /sos/stream - server-sent events for dashboards
pub async fn stream_alerts(
    Extension(hub): Extension<EventHub>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = futures::stream::unfold(hub.subscribe(), |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let name = match event.kind {
                        SosEventKind::Created => "sos_created",
                        SosEventKind::Updated => "sos_updated",
                    };
                    return Some((Event::default().event(name).json_data(&event), rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE subscriber lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transition_body_uses_defaults() {
        let request = TransitionRequest::from_body(b"").unwrap();
        assert_eq!(request.version, None);
        assert!(TransitionRequest::from_body(b" \n").is_ok());
    }

    #[test]
    fn transition_body_carries_version() {
        let request = TransitionRequest::from_body(br#"{"version":3,"resolution":"Rescued"}"#).unwrap();
        assert_eq!(request.version, Some(3));
        assert_eq!(request.resolution.as_deref(), Some("Rescued"));
    }

    #[test]
    fn mistyped_version_is_rejected_not_ignored() {
        let err = TransitionRequest::from_body(br#"{"version":"3"}"#).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(TransitionRequest::from_body(b"version=3").is_err());
    }
}
