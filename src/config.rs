//! Process configuration
//!
//! Read once at startup from the environment (after `.env` is loaded) and
//! handed to whatever needs it. Missing optional values switch the matching
//! feature off instead of failing startup.

use crate::error::CoachError;
use crate::Result;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "https://rococo-crumble-54594e.netlify.app",
];

/// Supabase REST credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
    pub supabase: Option<SupabaseConfig>,
    pub database_url: Option<String>,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            webhook_url: None,
            webhook_timeout: DEFAULT_WEBHOOK_TIMEOUT,
            supabase: None,
            database_url: None,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT").or_else(|| get("API_PORT")) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CoachError::Config(format!("invalid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let webhook_timeout = match get("WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(CoachError::Config(format!(
                        "invalid webhook timeout (positive seconds expected): {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_WEBHOOK_TIMEOUT,
        };

        let supabase = match (get("SUPABASE_URL"), get("SUPABASE_KEY")) {
            (Some(url), Some(key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                key,
            }),
            _ => None,
        };

        let allowed_origins: Vec<String> = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => Self::default().allowed_origins,
        };

        // Credentialed CORS cannot use a wildcard origin.
        if allowed_origins.iter().any(|o| o == "*") {
            return Err(CoachError::Config(
                "CORS_ALLOWED_ORIGINS cannot contain `*` when credentials are allowed".to_string(),
            ));
        }

        Ok(Self {
            port,
            webhook_url: get("WELLNESS_WEBHOOK_URL"),
            webhook_timeout,
            supabase,
            database_url: get("DATABASE_URL").or_else(|| get("POSTGRES_URL")),
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_disables_optional_features() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.webhook_url.is_none());
        assert!(config.supabase.is_none());
        assert_eq!(config.allowed_origins.len(), 2);
    }

    #[test]
    fn test_supabase_needs_both_values() {
        let config = config_from(&[("SUPABASE_URL", "https://x.supabase.co")]).unwrap();
        assert!(config.supabase.is_none());

        let config = config_from(&[
            ("SUPABASE_URL", "https://x.supabase.co/"),
            ("SUPABASE_KEY", "secret"),
        ])
        .unwrap();
        assert_eq!(
            config.supabase,
            Some(SupabaseConfig {
                url: "https://x.supabase.co".to_string(),
                key: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_PORT", "9090"),
            ("WELLNESS_WEBHOOK_URL", " https://hooks.example.com/sync "),
            ("WEBHOOK_TIMEOUT_SECS", "3"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("POSTGRES_URL", "postgres://localhost/wellness"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.webhook_url.as_deref(), Some("https://hooks.example.com/sync"));
        assert_eq!(config.webhook_timeout, Duration::from_secs(3));
        assert_eq!(config.allowed_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/wellness"));
    }

    #[test]
    fn test_blank_webhook_url_is_unset() {
        let config = config_from(&[("WELLNESS_WEBHOOK_URL", "   ")]).unwrap();
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_zero_webhook_timeout_is_config_error() {
        let err = config_from(&[("WEBHOOK_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, CoachError::Config(_)));
    }

    #[test]
    fn test_wildcard_origin_is_config_error() {
        let err = config_from(&[("CORS_ALLOWED_ORIGINS", "*")]).unwrap_err();
        assert!(matches!(err, CoachError::Config(_)));

        let err = config_from(&[("CORS_ALLOWED_ORIGINS", "https://a.example, *")]).unwrap_err();
        assert!(matches!(err, CoachError::Config(_)));
    }

    #[test]
    fn test_bad_port_is_config_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, CoachError::Config(_)));
    }
}
