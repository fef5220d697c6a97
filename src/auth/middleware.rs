use axum::{
    extract::{Extension, Request},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{DepartmentClaims, DepartmentRole, TokenKeys};
use crate::error::AppError;

pub const DEPARTMENT_TOKEN_HEADER: &str = "x-department-token";

/// Authenticated citizen, inserted into request extensions by [`citizen_auth`].
#[derive(Debug, Clone, PartialEq)]
pub struct CitizenSession {
    pub user_id: i32,
    pub email: String,
}

/// Authenticated department staff, inserted by [`department_auth`].
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSession(pub DepartmentClaims);

impl DepartmentSession {
    pub fn role(&self) -> DepartmentRole {
        self.0.role
    }

    pub fn require_any(&self, roles: &[DepartmentRole]) -> Result<(), AppError> {
        if roles.contains(&self.0.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Role {} may not perform this action",
                self.0.role
            )))
        }
    }

    /// How this staff member is recorded on the rows they touch.
    pub fn signature(&self) -> String {
        format!("{} ({})", self.0.name, self.0.department)
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

pub fn citizen_from_headers(headers: &HeaderMap, keys: &TokenKeys) -> Option<CitizenSession> {
    let claims = keys.verify_citizen(bearer(headers)?)?;
    let user_id = claims.sub.parse::<i32>().ok()?;
    Some(CitizenSession {
        user_id,
        email: claims.email,
    })
}

pub fn department_from_headers(headers: &HeaderMap, keys: &TokenKeys) -> Option<DepartmentSession> {
    let token = headers
        .get(DEPARTMENT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .or_else(|| bearer(headers))?;
    keys.verify_department(token).map(DepartmentSession)
}

pub async fn citizen_auth(
    Extension(keys): Extension<Arc<TokenKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    match citizen_from_headers(request.headers(), &keys) {
        Some(session) => {
            tracing::Span::current().record("user_id", session.user_id);
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => AppError::Unauthorized.into_response(),
    }
}

pub async fn department_auth(
    Extension(keys): Extension<Arc<TokenKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    match department_from_headers(request.headers(), &keys) {
        Some(session) => {
            tracing::Span::current()
                .record("user_email", session.0.email.as_str())
                .record("department", session.0.role.as_str());
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => AppError::Unauthorized.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"middleware-test-secret-0123456789", 1)
    }

    #[test]
    fn department_token_accepted_from_either_header() {
        let keys = keys();
        let token = keys
            .issue_department("responder@bantayalert.ph", DepartmentRole::EmergencyResponder, "Coordinator", "ERT")
            .unwrap();

        let mut custom = HeaderMap::new();
        custom.insert(DEPARTMENT_TOKEN_HEADER, HeaderValue::from_str(&token).unwrap());
        assert!(department_from_headers(&custom, &keys).is_some());

        let mut bearer = HeaderMap::new();
        bearer.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());
        assert!(department_from_headers(&bearer, &keys).is_some());
    }

    #[test]
    fn citizen_session_carries_user_id() {
        let keys = keys();
        let token = keys.issue_citizen(7, "ana@example.com").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap());

        let session = citizen_from_headers(&headers, &keys).unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.email, "ana@example.com");
        assert!(department_from_headers(&headers, &keys).is_none());
    }

    #[test]
    fn role_gate_rejects_other_departments() {
        let keys = keys();
        let token = keys
            .issue_department("healthcare@bantayalert.ph", DepartmentRole::Healthcare, "Liaison", "DOH")
            .unwrap();
        let session = DepartmentSession(keys.verify_department(&token).unwrap());

        assert!(session.require_any(&[DepartmentRole::Healthcare, DepartmentRole::Lgu]).is_ok());
        let err = session.require_any(&[DepartmentRole::EmergencyResponder]).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(session.signature(), "Liaison (DOH)");
    }
}
