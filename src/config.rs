use crate::domain::value_objects::{Diagnostics, Environment};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    // HTTP settings
    pub listen_addr: String,
    pub environment: Environment,

    // Diagnostics
    pub debug: bool,
    pub log_enabled: bool,
    pub debug_payload: bool,

    // Redirect config source
    pub config_path: Option<String>,
    pub config_url: Option<String>,
    pub config_timeout_secs: u64,
}

impl AppConfig {
    /// Diagnostic switches injected into the resolver and handlers.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.debug, self.debug_payload)
    }

    pub fn config_timeout(&self) -> Duration {
        Duration::from_secs(self.config_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            environment: Environment::Development,
            debug: false,
            log_enabled: false,
            debug_payload: true,
            config_path: None,
            config_url: None,
            config_timeout_secs: 5,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(default)
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let listen_addr = std::env::var("GEO_LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let environment = std::env::var("GEO_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|v| Environment::from_str(&v))
        .unwrap_or_default();

    let debug = std::env::var("DEBUG").is_ok();

    let log_enabled = env_flag("GEO_LOG_ENABLED", false);

    let debug_payload = env_flag("GEO_DEBUG_PAYLOAD", true);

    // Redirect config source
    let config_path = std::env::var("GEO_CONFIG_PATH").ok();
    let config_url = std::env::var("GEO_CONFIG_URL").ok();

    let config_timeout_secs = std::env::var("GEO_CONFIG_TIMEOUT_SECS")
        .unwrap_or_else(|_| "5".to_string())
        .parse()
        .unwrap_or(5);

    Ok(AppConfig {
        listen_addr,
        environment,
        debug,
        log_enabled,
        debug_payload,
        config_path,
        config_url,
        config_timeout_secs,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests below mutate process environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.environment, Environment::Development);
        assert!(!cfg.log_enabled);
        assert!(cfg.debug_payload);
        assert!(cfg.config_path.is_none());
        assert_eq!(cfg.config_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_diagnostics_follow_flags() {
        let cfg = AppConfig {
            debug: true,
            debug_payload: false,
            ..AppConfig::default()
        };
        assert_eq!(cfg.diagnostics(), Diagnostics::new(true, false));
    }

    #[test]
    fn test_load_config_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("GEO_LISTEN_ADDR");
        std::env::remove_var("GEO_ENV");
        std::env::remove_var("APP_ENV");

        let cfg = load_config().unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
        assert_eq!(cfg.environment, Environment::Development);
    }

    #[test]
    fn test_load_config_with_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("GEO_ENV", "production");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.environment, Environment::Production);
        std::env::remove_var("GEO_ENV");
    }

    #[test]
    fn test_load_config_app_env_fallback() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("GEO_ENV");
        std::env::set_var("APP_ENV", "test");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.environment, Environment::Test);
        std::env::remove_var("APP_ENV");
    }

    #[test]
    fn test_load_config_with_log_enabled() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("GEO_LOG_ENABLED", "TRUE");
        let cfg = load_config().unwrap();
        assert!(cfg.log_enabled);
        std::env::remove_var("GEO_LOG_ENABLED");
    }

    #[test]
    fn test_load_config_with_debug_payload_disabled() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("GEO_DEBUG_PAYLOAD", "0");
        let cfg = load_config().unwrap();
        assert!(!cfg.debug_payload);
        std::env::remove_var("GEO_DEBUG_PAYLOAD");
    }

    #[test]
    fn test_load_config_with_sources() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("GEO_CONFIG_PATH", "/etc/geo/redirects.json");
        std::env::set_var("GEO_CONFIG_URL", "https://cdn.example.com/config.json");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.config_path.as_deref(), Some("/etc/geo/redirects.json"));
        assert_eq!(
            cfg.config_url.as_deref(),
            Some("https://cdn.example.com/config.json")
        );
        std::env::remove_var("GEO_CONFIG_PATH");
        std::env::remove_var("GEO_CONFIG_URL");
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("GEO_CONFIG_TIMEOUT_SECS", "not_a_number");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.config_timeout_secs, 5); // default
        std::env::remove_var("GEO_CONFIG_TIMEOUT_SECS");
    }

    #[test]
    fn test_load_config_with_debug() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("DEBUG", "1");
        let cfg = load_config().unwrap();
        assert!(cfg.debug);
        assert!(cfg.diagnostics().verbose);
        std::env::remove_var("DEBUG");
    }
}
