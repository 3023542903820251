use curator_types::ConfigError;
use std::time::Duration;
use url::Url;

/// Environment variables holding the backend URL, first match wins.
pub const URL_VARS: &[&str] = &["SUPABASE_URL", "VITE_SUPABASE_URL"];
/// Environment variables holding the backend access key, first match wins.
pub const KEY_VARS: &[&str] = &["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];
/// Optional request timeout override, in seconds.
pub const TIMEOUT_VAR: &str = "SUPABASE_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::invalid("backend_url", e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid("backend_url", "scheme must be http or https"));
        }
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::invalid("backend_key", "must not be empty"));
        }
        Ok(Self { base_url, api_key, timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS) })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from process environment. Missing URL or key is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names.iter().find_map(|n| lookup(n).filter(|v| !v.trim().is_empty()))
        };
        let url = first(URL_VARS).ok_or_else(|| ConfigError::missing(URL_VARS[0]))?;
        let key = first(KEY_VARS).ok_or_else(|| ConfigError::missing(KEY_VARS[0]))?;
        let mut config = Self::new(url.trim(), key.trim())?;

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(TIMEOUT_VAR, format!("not a number: {}", raw)))?;
            config.timeout = Duration::from_secs(secs.max(1));
        }
        Ok(config)
    }

    /// `{base}/rest/v1/{table}`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.as_str().trim_end_matches('/'), table)
    }

    /// `{base}/functions/v1/{name}`
    pub fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url.as_str().trim_end_matches('/'), name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.rest_url("videos"), "https://demo.supabase.co/rest/v1/videos");
        assert_eq!(
            config.function_url("youtube-video-sync"),
            "https://demo.supabase.co/functions/v1/youtube-video-sync"
        );
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_from_lookup_accepts_vite_names() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("VITE_SUPABASE_URL", "https://demo.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "anon"),
            ("SUPABASE_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "anon");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let only_url = lookup(&[("SUPABASE_URL", "https://demo.supabase.co")]);
        let err = BackendConfig::from_lookup(only_url).unwrap_err();
        assert_eq!(err, ConfigError::missing("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_blank_url_counts_as_missing() {
        let err = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "   "),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::missing("SUPABASE_URL"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(BackendConfig::new("not a url", "anon").is_err());
        assert!(BackendConfig::new("ftp://demo.supabase.co", "anon").is_err());
    }
}
