use std::time::Duration;

use actix_web::cookie::Key;

use crate::models::attendance::RateThresholds;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_API_BASE_URL: &str = "http://54.169.143.234:8080/api";
const DEFAULT_MONITOR_BASE_URL: &str = "http://course-inspection.wjunzs.com:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_APP_NAME: &str = "Classwatch";

/// Runtime configuration, read once at startup from the environment
/// (after `dotenvy` has loaded any `.env` file).
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_base_url: String,
    pub monitor_base_url: String,
    pub request_timeout: Duration,
    pub app_name: String,
    pub thresholds: RateThresholds,
    pub session_key: Key,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup. Invalid values
    /// are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let monitor_base_url = lookup("MONITOR_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_MONITOR_BASE_URL.to_string());
        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        let app_name = lookup("APP_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string());

        let defaults = RateThresholds::default();
        let good = parse_or(&lookup, "ATTENDANCE_GOOD_PERCENT", defaults.good);
        let warning = parse_or(&lookup, "ATTENDANCE_WARNING_PERCENT", defaults.warning);
        let thresholds = match RateThresholds::new(good, warning) {
            Some(t) => t,
            None => {
                log::warn!(
                    "Attendance thresholds good={good} warning={warning} are inconsistent; using {}/{}",
                    defaults.good,
                    defaults.warning
                );
                defaults
            }
        };

        // Session encryption key; a random one means sessions are lost on restart
        let session_key = match lookup("SESSION_KEY") {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        };

        Self {
            bind_addr,
            api_base_url,
            monitor_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            app_name,
            thresholds,
            session_key,
        }
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {name}={raw:?}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config_from(&[]);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(cfg.monitor_base_url, DEFAULT_MONITOR_BASE_URL);
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.thresholds, RateThresholds::default());
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cfg = config_from(&[("API_BASE_URL", "http://localhost:9000/api/")]);
        assert_eq!(cfg.api_base_url, "http://localhost:9000/api");
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let cfg = config_from(&[("REQUEST_TIMEOUT_SECS", "soon"), ("ATTENDANCE_GOOD_PERCENT", "x")]);
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.thresholds.good, 80);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let cfg = config_from(&[("ATTENDANCE_GOOD_PERCENT", "50"), ("ATTENDANCE_WARNING_PERCENT", "70")]);
        assert_eq!(cfg.thresholds, RateThresholds::default());
    }

    #[test]
    fn custom_thresholds_are_used() {
        let cfg = config_from(&[("ATTENDANCE_GOOD_PERCENT", "90"), ("ATTENDANCE_WARNING_PERCENT", "70")]);
        assert_eq!(cfg.thresholds.good, 90);
        assert_eq!(cfg.thresholds.warning, 70);
    }
}
