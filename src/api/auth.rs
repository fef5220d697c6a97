use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr,
};
use serde_json::json;
use std::sync::Arc;

use crate::auth::{
    password::{hash_password, verify_password},
    DepartmentRole, DepartmentSession, TokenKeys,
};
use crate::entities::{department_account, user, DepartmentAccounts, Users};
use crate::error::AppError;
use super::extract::AppJson;

#[derive(serde::Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    name: String,
    phone: Option<String>,
    city: Option<String>,
}

#[derive(serde::Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// POST /auth/signup
pub async fn signup(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(keys): Extension<Arc<TokenKeys>>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&payload.email);
    if !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if payload.password.len() < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }

    let now = Utc::now().naive_utc();
    let new_user = user::ActiveModel {
        email: Set(email),
        password_hash: Set(hash_password(&payload.password)?),
        name: Set(payload.name.trim().to_string()),
        phone: Set(payload.phone),
        city: Set(payload.city),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let user = match new_user.insert(&*db).await {
        Ok(user) => user,
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::Span::current()
                .record("table", "users")
                .record("action", "signup_failed")
                .record("error", "duplicate_email");
            return Err(AppError::Conflict("Email already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::Span::current()
        .record("table", "users")
        .record("action", "signup")
        .record("user_id", user.id)
        .record("user_email", user.email.as_str())
        .record("business_event", "Citizen registered");
    crate::metrics::record_user_registered();

    let token = keys.issue_citizen(user.id, &user.email)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "email": user.email,
            "name": user.name,
            "access_token": token,
            "expires_in": keys.ttl_seconds(),
        })),
    ))
}

// POST /auth/login
pub async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(keys): Extension<Arc<TokenKeys>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = Users::find()
        .filter(user::Column::Email.eq(normalize_email(&payload.email)))
        .one(&*db)
        .await?;

    let user = match user {
        Some(u) if verify_password(&payload.password, &u.password_hash) => u,
        _ => {
            tracing::Span::current()
                .record("table", "users")
                .record("action", "login_failed")
                .record("error", "invalid_credentials");
            return Err(AppError::InvalidCredentials);
        }
    };

    tracing::Span::current()
        .record("table", "users")
        .record("action", "login")
        .record("user_id", user.id)
        .record("business_event", "Citizen logged in");

    let token = keys.issue_citizen(user.id, &user.email)?;
    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": keys.ttl_seconds(),
        "user": {"id": user.id, "email": user.email, "name": user.name},
    })))
}

// POST /auth/department/login
pub async fn department_login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(keys): Extension<Arc<TokenKeys>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = DepartmentAccounts::find()
        .filter(department_account::Column::Email.eq(normalize_email(&payload.email)))
        .one(&*db)
        .await?;

    let account = match account {
        Some(a) if verify_password(&payload.password, &a.password_hash) => a,
        _ => {
            tracing::Span::current()
                .record("table", "department_accounts")
                .record("action", "department_login_failed")
                .record("error", "invalid_credentials");
            return Err(AppError::InvalidCredentials);
        }
    };

    let role: DepartmentRole = account.role.parse().map_err(AppError::Internal)?;
    let token = keys.issue_department(&account.email, role, &account.name, &account.department)?;

    tracing::Span::current()
        .record("table", "department_accounts")
        .record("action", "department_login")
        .record("user_email", account.email.as_str())
        .record("department", role.as_str())
        .record("business_event", "Department staff logged in");
    crate::metrics::record_department_login(role);

    Ok(Json(json!({
        "token": token,
        "expires_in": keys.ttl_seconds(),
        "user": {
            "email": account.email,
            "name": account.name,
            "role": role,
            "department": account.department,
        },
    })))
}

// GET /auth/department/verify
pub async fn department_verify(
    Extension(session): Extension<DepartmentSession>,
) -> impl IntoResponse {
    Json(json!({"valid": true, "user": session.0}))
}
