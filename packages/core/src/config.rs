use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.oklink.com";
pub const DEFAULT_LOCALE: &str = "zh-hans";
pub const DEFAULT_OUTPUT_PATH: &str = "reward_fees.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub explorer_base_url: String,
    pub explorer_locale: String,
    pub output_path: PathBuf,
    pub request_delay: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Unset
    /// variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explorer_base_url =
            lookup("EXPLORER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let explorer_locale =
            lookup("EXPLORER_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let output_path = lookup("OUTPUT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let request_delay_ms = match lookup("REQUEST_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| format!("REQUEST_DELAY_MS must be a valid number, got {:?}", raw))?,
            None => 0,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| format!("REQUEST_TIMEOUT_SECS must be a valid number, got {:?}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            return Err("REQUEST_TIMEOUT_SECS must be greater than zero".to_string());
        }

        let user_agent = lookup("HTTP_USER_AGENT").unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });

        Ok(Self {
            explorer_base_url,
            explorer_locale,
            output_path,
            request_delay: Duration::from_millis(request_delay_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.explorer_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.explorer_locale, DEFAULT_LOCALE);
        assert_eq!(config.output_path, PathBuf::from("reward_fees.csv"));
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("btc-fee-scraper/"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("EXPLORER_BASE_URL", "http://localhost:3000"),
            ("EXPLORER_LOCALE", "en"),
            ("OUTPUT_PATH", "/tmp/out.csv"),
            ("REQUEST_DELAY_MS", "1500"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.explorer_base_url, "http://localhost:3000");
        assert_eq!(config.explorer_locale, "en");
        assert_eq!(config.output_path, PathBuf::from("/tmp/out.csv"));
        assert_eq!(config.request_delay, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn non_numeric_delay_is_rejected() {
        let err = config_from(&[("REQUEST_DELAY_MS", "soon")]).unwrap_err();
        assert!(err.contains("REQUEST_DELAY_MS"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }
}
