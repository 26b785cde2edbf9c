mod models;

use std::{fs, path::Path, sync::OnceLock};

pub use models::Settings;

/// Environment variable holding the settings as a JSON document.
pub const CONFIG_ENV: &str = "EKS_AMI_RESOLVER_CONFIG";

/// Single, module-private cache (set exactly once).
static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Parse settings without touching the cache.
pub fn parse(json: &str) -> Result<Settings, ConfigError> {
    serde_json::from_str(json).map_err(ConfigError::Json)
}

/// Initialize from a JSON file path.
pub fn init_from_file(path: impl AsRef<Path>) -> Result<&'static Settings, ConfigError> {
    let data = fs::read_to_string(path).map_err(ConfigError::Io)?;
    init_from_json_str(&data)
}

/// Initialize from a JSON string.
pub fn init_from_json_str(json: &str) -> Result<&'static Settings, ConfigError> {
    store(parse(json)?)
}

/// Initialize from an env var containing JSON.
pub fn init_from_env(var: &str) -> Result<&'static Settings, ConfigError> {
    let s = std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))?;
    init_from_json_str(&s)
}

/// Initialize with every setting unset.
pub fn init_default() -> Result<&'static Settings, ConfigError> {
    store(Settings::default())
}

fn store(settings: Settings) -> Result<&'static Settings, ConfigError> {
    SETTINGS
        .set(settings)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    self::settings()
}

/// Borrow the loaded settings.
pub fn settings() -> Result<&'static Settings, ConfigError> {
    SETTINGS.get().ok_or(ConfigError::NotInitialized)
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("settings are not initialized")]
    NotInitialized,
    #[error("settings already initialized")]
    AlreadyInitialized,
    #[error("missing env var: {0}")]
    MissingEnv(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Settings, init_default, init_from_json_str, parse, settings};

    // The only test touching the process-wide cache.
    #[test]
    fn cache_is_set_exactly_once() {
        let loaded = init_from_json_str(r#"{"version": "1.12"}"#).expect("first init");
        assert_eq!(loaded.version(), Some("1.12"));
        assert!(matches!(init_default(), Err(ConfigError::AlreadyInitialized)));
        assert_eq!(settings().expect("initialized").version(), Some("1.12"));
    }

    #[test]
    fn parse_full_document() {
        let settings = parse(
            r#"{
                "region": "us-west-2",
                "version": "1.12",
                "instance_type": "m5.large",
                "image_family": "Ubuntu1804",
                "log_level": "debug"
            }"#,
        )
        .expect("valid settings");

        assert_eq!(settings.region(), Some("us-west-2"));
        assert_eq!(settings.version(), Some("1.12"));
        assert_eq!(settings.instance_type(), Some("m5.large"));
        assert_eq!(settings.image_family(), Some("Ubuntu1804"));
        assert_eq!(settings.log_level(), Some("debug"));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let settings = parse(r#"{"region": "eu-west-1"}"#).expect("valid settings");
        assert_eq!(
            settings,
            Settings {
                region: Some("eu-west-1".to_string()),
                ..Settings::default()
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            parse(r#"{"regoin": "eu-west-1"}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = parse("{").unwrap_err();
        assert!(err.to_string().starts_with("JSON error:"), "{err}");
    }
}
