use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{header, HeaderName, HeaderValue, Method, Request, Response},
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api;
use crate::auth::{
    middleware::{citizen_auth, department_auth, DEPARTMENT_TOKEN_HEADER},
    TokenKeys,
};
use crate::events::EventHub;
use crate::seed::Seeder;

/// Everything the handlers reach through request extensions.
#[derive(Clone)]
pub struct AppContext {
    pub db: Arc<DatabaseConnection>,
    pub keys: Arc<TokenKeys>,
    pub hub: EventHub,
    pub seeder: Arc<Seeder>,
    pub cors_origin: HeaderValue,
}

async fn health_check(
    Extension(seeder): Extension<Arc<Seeder>>,
    Extension(hub): Extension<EventHub>,
) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "bantay-alert",
        "seeded": seeder.is_seeded(),
        "stream_subscribers": hub.subscriber_count(),
    }))
}

pub fn router(ctx: AppContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/department/login", post(api::auth::department_login))
        .route("/weather/:location", get(api::weather::get_weather))
        .route("/sos/create", post(api::sos::create_alert))
        .route("/evacuation-centers", get(api::evacuation::list_centers))
        .route("/evacuation-centers/nearest", get(api::evacuation::nearest_centers));

    let citizen_routes = Router::new()
        .route(
            "/user/data",
            get(api::user_data::get_user_data)
                .post(api::user_data::save_user_data)
                .delete(api::user_data::delete_user_data),
        )
        .route(
            "/activity/log",
            get(api::activity::list_activity).post(api::activity::log_activity),
        )
        .route("/sos/mine", get(api::sos::list_my_alerts))
        .route_layer(middleware::from_fn(citizen_auth));

    let department_routes = Router::new()
        .route("/auth/department/verify", get(api::auth::department_verify))
        .route("/analytics/summary", get(api::analytics::summary))
        .route("/sos/alerts", get(api::sos::list_alerts))
        .route("/sos/alerts/:id", get(api::sos::get_alert))
        .route("/sos/alerts/:id/dispatch", post(api::sos::dispatch_alert))
        .route("/sos/alerts/:id/resolve", post(api::sos::resolve_alert))
        .route("/sos/alerts/:id/cancel", post(api::sos::cancel_alert))
        .route("/sos/stream", get(api::sos::stream_alerts))
        .route(
            "/healthcare/hospitals",
            get(api::healthcare::list_hospitals).post(api::healthcare::create_hospital),
        )
        .route(
            "/healthcare/hospitals/:id/capacity",
            patch(api::healthcare::update_capacity),
        )
        .route("/disasters", post(api::disasters::create_disaster))
        .route("/disasters/active", get(api::disasters::list_active))
        .route("/disasters/:id/status", patch(api::disasters::update_status))
        .route_layer(middleware::from_fn(department_auth));

    Router::new()
        .merge(public_routes)
        .merge(citizen_routes)
        .merge(department_routes)
        .layer(Extension(ctx.db))
        .layer(Extension(ctx.keys))
        .layer(Extension(ctx.hub))
        .layer(Extension(ctx.seeder))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched| matched.as_str());

                    // "POST /sos/create"
                    let span_name = match matched_path {
                        Some(path) => format!("{} {}", request.method(), path),
                        None => format!("{} {}", request.method(), request.uri().path()),
                    };

                    let user_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .and_then(|v| v.to_str().ok())
                        .or_else(|| {
                            request
                                .headers()
                                .get("x-real-ip")
                                .and_then(|v| v.to_str().ok())
                        })
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        user_ip = user_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by middleware and handlers
                        table = tracing::field::Empty,
                        action = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        user_email = tracing::field::Empty,
                        department = tracing::field::Empty,
                        alert_id = tracing::field::Empty,
                        business_event = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &Request<Body>, _span: &tracing::Span| {})
                .on_response(|response: &Response<_>, latency: Duration, span: &tracing::Span| {
                    span.record("status", tracing::field::display(response.status()));
                    span.record("latency", tracing::field::debug(latency));
                    tracing::info!("request completed");
                }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(ctx.cors_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    HeaderName::from_static(DEPARTMENT_TOKEN_HEADER),
                ]),
        )
}
