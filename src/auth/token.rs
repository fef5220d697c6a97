//! Bearer tokens for department staff and citizens.
//!
//! Both kinds are HS256 JWTs signed with the server-held `JWT_SECRET`. They are
//! told apart by audience, so a citizen session never passes as a department
//! credential. Department tokens also carry a `dept_` prefix, which is what
//! clients put in the `x-department-token` header.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::DepartmentRole;
use crate::error::AppError;

pub const DEPARTMENT_TOKEN_PREFIX: &str = "dept_";

const ISSUER: &str = "bantayalert";
const DEPARTMENT_AUDIENCE: &str = "department";
const CITIZEN_AUDIENCE: &str = "citizen";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentClaims {
    pub sub: String,
    pub email: String,
    pub role: DepartmentRole,
    pub name: String,
    pub department: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenClaims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue_department(
        &self,
        email: &str,
        role: DepartmentRole,
        name: &str,
        department: &str,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = DepartmentClaims {
            sub: email.to_string(),
            email: email.to_string(),
            role,
            name: name.to_string(),
            department: department.to_string(),
            iss: ISSUER.to_string(),
            aud: DEPARTMENT_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        let jwt = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign department token: {e}")))?;
        Ok(format!("{DEPARTMENT_TOKEN_PREFIX}{jwt}"))
    }

    /// Every failure (prefix, encoding, signature, expiry, audience) collapses
    /// to `None`. The reason only goes to the debug log.
    pub fn verify_department(&self, token: &str) -> Option<DepartmentClaims> {
        let jwt = token.strip_prefix(DEPARTMENT_TOKEN_PREFIX)?;
        decode::<DepartmentClaims>(jwt, &self.decoding, &validation(DEPARTMENT_AUDIENCE))
            .map(|data| data.claims)
            .map_err(|e| tracing::debug!("Department token rejected: {}", e))
            .ok()
    }

    pub fn issue_citizen(&self, user_id: i32, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = CitizenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: ISSUER.to_string(),
            aud: CITIZEN_AUDIENCE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {e}")))
    }

    pub fn verify_citizen(&self, token: &str) -> Option<CitizenClaims> {
        decode::<CitizenClaims>(token, &self.decoding, &validation(CITIZEN_AUDIENCE))
            .map(|data| data.claims)
            .map_err(|e| tracing::debug!("Citizen token rejected: {}", e))
            .ok()
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

fn validation(audience: &str) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[audience]);
    validation.set_issuer(&[ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
    validation
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-that-is-long-enough-123";

    fn keys() -> TokenKeys {
        TokenKeys::new(SECRET, 12)
    }

    fn lgu_token(keys: &TokenKeys) -> String {
        keys.issue_department(
            "lgu@bantayalert.ph",
            DepartmentRole::Lgu,
            "LGU Operations Officer",
            "Local Government Unit",
        )
        .unwrap()
    }

    #[test]
    fn issued_department_token_verifies_to_original_claims() {
        let keys = keys();
        let token = lgu_token(&keys);

        assert!(token.starts_with(DEPARTMENT_TOKEN_PREFIX));

        let claims = keys.verify_department(&token).unwrap();
        assert_eq!(claims.email, "lgu@bantayalert.ph");
        assert_eq!(claims.role, DepartmentRole::Lgu);
        assert_eq!(claims.name, "LGU Operations Officer");
        assert_eq!(claims.department, "Local Government Unit");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let keys = keys();
        let token = lgu_token(&keys);
        let bare = token.trim_start_matches(DEPARTMENT_TOKEN_PREFIX);

        assert!(keys.verify_department(bare).is_none());
        assert!(keys.verify_department(&format!("dep_{bare}")).is_none());
    }

    #[test]
    fn flipped_payload_byte_is_rejected() {
        let keys = keys();
        let token = lgu_token(&keys);
        let payload_start = token.find('.').unwrap() + 1;
        let target = payload_start + 10;

        let mut bytes = token.into_bytes();
        bytes[target] = if bytes[target] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(keys.verify_department(&tampered).is_none());
    }

    #[test]
    fn flipped_signature_byte_is_rejected() {
        let keys = keys();
        let token = lgu_token(&keys);
        let signature_start = token.rfind('.').unwrap() + 1;
        let target = signature_start + 5;

        let mut bytes = token.into_bytes();
        bytes[target] = if bytes[target] == b'x' { b'y' } else { b'x' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(keys.verify_department(&tampered).is_none());
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let keys = keys();
        let token = lgu_token(&keys);
        let truncated = &token[..token.len() - 6];

        assert!(keys.verify_department(truncated).is_none());
    }

    #[test]
    fn wrong_part_count_is_rejected() {
        let keys = keys();
        let token = lgu_token(&keys);
        let (head, _) = token.rsplit_once('.').unwrap();

        assert!(keys.verify_department(head).is_none());
        assert!(keys.verify_department("dept_").is_none());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenKeys::new(b"a-completely-different-secret-value", 12);
        let token = lgu_token(&other);

        assert!(keys().verify_department(&token).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = TokenKeys::new(SECRET, -2);
        let token = lgu_token(&expired);

        assert!(keys().verify_department(&token).is_none());
    }

    #[test]
    fn citizen_and_department_tokens_do_not_cross() {
        let keys = keys();
        let citizen = keys.issue_citizen(42, "juan@example.com").unwrap();
        let department = lgu_token(&keys);

        assert!(keys.verify_department(&format!("{DEPARTMENT_TOKEN_PREFIX}{citizen}")).is_none());
        assert!(keys.verify_citizen(department.trim_start_matches(DEPARTMENT_TOKEN_PREFIX)).is_none());

        let claims = keys.verify_citizen(&citizen).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "juan@example.com");
    }
}
