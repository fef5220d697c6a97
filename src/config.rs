use anyhow::{anyhow, Context, Result};
use std::{env, fmt::Display, str::FromStr};
use tracing::info;

/// Thirty days.
const MAX_TOKEN_TTL_HOURS: i64 = 720;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub cors_origin: String,
    pub department_seed_password: Option<String>,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;
        if jwt_secret.len() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 bytes"));
        }

        let token_ttl_hours = parse_or(&lookup, "TOKEN_TTL_HOURS", 12)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(anyhow!(
                "TOKEN_TTL_HOURS must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {token_ttl_hours}"
            ));
        }

        let department_seed_password = lookup("DEPARTMENT_SEED_PASSWORD").filter(|p| !p.is_empty());

        Ok(Self {
            database_url,
            port: parse_or(&lookup, "PORT", 8000)?,
            jwt_secret,
            token_ttl_hours,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string()),
            department_seed_password,
            seed_demo_data: parse_or(&lookup, "SEED_DEMO_DATA", true)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply_when_optional_keys_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/bantay"),
            ("JWT_SECRET", SECRET),
        ]))
        .unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.token_ttl_hours, 12);
        assert_eq!(config.cors_origin, "http://localhost:3000");
        assert!(config.department_seed_password.is_none());
        assert!(config.seed_demo_data);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/bantay"),
            ("JWT_SECRET", SECRET),
            ("PORT", "9090"),
            ("TOKEN_TTL_HOURS", "2"),
            ("SEED_DEMO_DATA", "false"),
            ("DEPARTMENT_SEED_PASSWORD", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.token_ttl_hours, 2);
        assert!(!config.seed_demo_data);
        assert_eq!(config.department_seed_password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", SECRET)])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/bantay"),
            ("JWT_SECRET", "short"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("32 bytes"));
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/bantay"),
            ("JWT_SECRET", SECRET),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn token_ttl_outside_bounds_is_rejected() {
        for ttl in ["0", "-4", "721", "9223372036854775807"] {
            let err = AppConfig::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://db/bantay"),
                ("JWT_SECRET", SECRET),
                ("TOKEN_TTL_HOURS", ttl),
            ]))
            .unwrap_err();
            assert!(err.to_string().contains("TOKEN_TTL_HOURS"), "{ttl}: {err}");
        }
    }
}
