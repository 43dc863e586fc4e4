use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::Duration;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on an uploaded CSV body.
    pub max_upload_bytes: usize,
    /// Idle time after which a session and its unsaved table are dropped.
    pub session_ttl: Duration,
    pub export_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 5 * 1024 * 1024,
            session_ttl: Duration::hours(12),
            export_filename: "job_data.csv".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            session_ttl: session_ttl(env_or(
                "SESSION_TTL_MINUTES",
                defaults.session_ttl.num_minutes(),
            )?)?,
            export_filename: std::env::var("EXPORT_FILENAME").unwrap_or(defaults.export_filename),
        })
    }
}

/// A TTL of zero or less would expire every session on its next request.
fn session_ttl(minutes: i64) -> Result<Duration> {
    if minutes <= 0 {
        bail!("SESSION_TTL_MINUTES must be positive, got {minutes}");
    }
    Duration::try_minutes(minutes)
        .with_context(|| format!("SESSION_TTL_MINUTES={minutes} is out of range"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let v: u16 = env_or("JOBTRACK_TEST_UNSET_PORT", 9000).unwrap();
        assert_eq!(v, 9000);
    }

    #[test]
    fn test_env_or_parses_value() {
        std::env::set_var("JOBTRACK_TEST_TTL", "15");
        let v: i64 = env_or("JOBTRACK_TEST_TTL", 720).unwrap();
        assert_eq!(v, 15);
    }

    #[test]
    fn test_session_ttl_accepts_positive_minutes() {
        assert_eq!(session_ttl(30).unwrap(), Duration::minutes(30));
    }

    #[test]
    fn test_session_ttl_rejects_non_positive() {
        assert!(session_ttl(0).is_err());
        let err = session_ttl(-5).unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_session_ttl_rejects_overflowing_minutes() {
        let err = session_ttl(i64::MAX).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_env_or_rejects_garbage() {
        std::env::set_var("JOBTRACK_TEST_BAD_PORT", "eighty");
        let err = env_or::<u16>("JOBTRACK_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("JOBTRACK_TEST_BAD_PORT"));
    }
}
