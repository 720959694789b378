use crate::strategy::StrategyOptions;
use serde::{Deserialize, Serialize};
use std::fs;

/// Name of the settings file looked up in the working directory and the secrets directory
const SETTINGS_FILE: &str = "Settings.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct YahooTokenSettings {
    #[serde(default)]
    pub application: ApplicationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub http: HttpClientSettings,
    #[serde(default)]
    pub strategy: StrategyOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpClientSettings {
    /// Request timeout for calls to the profile endpoint.
    /// `None` leaves reqwest's default (no timeout).
    pub timeout_seconds: Option<u64>,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: "http://localhost:3000,http://localhost:8080".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl YahooTokenSettings {
    /// Load settings from configuration files and environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read or parsed
    /// - Logger initialization fails
    /// - The resulting strategy options are invalid
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_env_file();

        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        settings.logger_builder().try_init()?;
        settings.strategy.validate()?;

        Ok(settings)
    }

    /// Logger configured with `logging.level`, which `RUST_LOG` overrides
    #[must_use]
    pub fn logger_builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&self.logging.level);
        builder
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `YAHOO_TOKEN_SECRETS_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings file cannot be read
    /// - TOML parsing fails
    pub fn load_base_settings() -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings = Self::default();

        let default_config_path = std::path::PathBuf::from(SETTINGS_FILE);
        if default_config_path.exists() {
            settings = Self::from_toml_file(&default_config_path)?;
            log::info!(
                "Loaded base settings from {}",
                default_config_path.display()
            );
        }

        if let Ok(secrets_dir) = std::env::var("YAHOO_TOKEN_SECRETS_DIR") {
            let secrets_path = std::path::Path::new(&secrets_dir).join(SETTINGS_FILE);
            if secrets_path.exists() {
                settings = Self::from_toml_file(&secrets_path)?;
                log::info!("Overriding settings from {}", secrets_path.display());
            } else {
                log::info!(
                    "YAHOO_TOKEN_SECRETS_DIR set but no Settings.toml found at: {}",
                    secrets_path.display()
                );
            }
        }

        Ok(settings)
    }

    /// Parse a settings file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for these settings
    pub fn from_toml_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let toml_content = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        Self::apply_application_env_overrides(&mut settings.application);
        Self::apply_logging_env_overrides(&mut settings.logging);
        Self::apply_http_env_overrides(&mut settings.http);
        Self::apply_strategy_env_overrides(&mut settings.strategy);
    }

    fn apply_application_env_overrides(app_settings: &mut ApplicationSettings) {
        if let Ok(host) = std::env::var("HOST") {
            app_settings.host = host;
        }
        if let Ok(port_str) = std::env::var("PORT") {
            if let Ok(port) = port_str.parse::<u16>() {
                app_settings.port = port;
            }
        }
        if let Ok(cors_origins) = std::env::var("CORS_ORIGINS") {
            app_settings.cors_origins = cors_origins;
        }
    }

    fn apply_logging_env_overrides(logging_settings: &mut LoggingSettings) {
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            logging_settings.level = log_level;
        }
    }

    fn apply_http_env_overrides(http_settings: &mut HttpClientSettings) {
        if let Ok(value_str) = std::env::var("HTTP_TIMEOUT_SECONDS") {
            if let Ok(value) = value_str.parse::<u64>() {
                http_settings.timeout_seconds = Some(value);
            }
        }
    }

    /// Apply environment overrides for the strategy options.
    /// Client credentials are usually only supplied this way.
    pub fn apply_strategy_env_overrides(options: &mut StrategyOptions) {
        Self::apply_string_env_override("YAHOO_CLIENT_ID", &mut options.client_id);
        Self::apply_string_env_override("YAHOO_CLIENT_SECRET", &mut options.client_secret);
        Self::apply_string_env_override("YAHOO_PROFILE_URL", &mut options.profile_url);
        if let Ok(value_str) = std::env::var("PASS_REQ_TO_CALLBACK") {
            if let Ok(value) = value_str.parse::<bool>() {
                options.pass_request_to_callback = value;
            }
        }
    }

    /// Empty values are ignored so an unset-but-exported variable does not wipe the file value
    fn apply_string_env_override(env_var: &str, target: &mut String) {
        if let Ok(value) = std::env::var(env_var) {
            if !value.is_empty() {
                *target = value;
            }
        }
    }

    /// Load environment variables from .env file
    fn load_env_file() {
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    std::env::set_var(key.trim(), value.trim());
                }
            }
        }
    }

    /// Get the bind address for the server
    #[must_use]
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.application.host, self.application.port)
    }

    /// Get CORS origins as a vector of strings
    #[must_use]
    pub fn get_cors_origins(&self) -> Vec<String> {
        self.application
            .cors_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Request timeout for the provider HTTP client
    #[must_use]
    pub fn http_timeout(&self) -> Option<std::time::Duration> {
        self.http.timeout_seconds.map(std::time::Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = YahooTokenSettings::default();

        assert_eq!(settings.get_bind_address(), "0.0.0.0:8080");
        assert_eq!(settings.logging.level, "info");
        assert!(settings.http_timeout().is_none());
        assert_eq!(settings.strategy.account_id_field, "xoauth_yahoo_guid");
    }

    #[test]
    fn test_cors_origins_are_trimmed() {
        let mut settings = YahooTokenSettings::default();
        settings.application.cors_origins = " https://a.example , https://b.example,".to_string();

        assert_eq!(
            settings.get_cors_origins(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_parse_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[application]
host = "127.0.0.1"
port = 9000
cors_origins = ""

[http]
timeout_seconds = 5

[strategy]
client_id = "file-client"
client_secret = "file-secret"
pass_request_to_callback = true
"#
        )
        .unwrap();

        let settings = YahooTokenSettings::from_toml_file(file.path()).unwrap();

        assert_eq!(settings.get_bind_address(), "127.0.0.1:9000");
        assert_eq!(
            settings.http_timeout(),
            Some(std::time::Duration::from_secs(5))
        );
        assert_eq!(settings.strategy.client_id, "file-client");
        assert!(settings.strategy.pass_request_to_callback);
        // Unspecified options keep their defaults
        assert_eq!(settings.strategy.access_token_field, "access_token");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    #[serial]
    fn test_secrets_dir_overrides_base_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Settings.toml"),
            "[strategy]\nclient_id = \"secret-dir-client\"\nclient_secret = \"s\"\n",
        )
        .unwrap();

        std::env::set_var("YAHOO_TOKEN_SECRETS_DIR", dir.path());
        let settings = YahooTokenSettings::load_base_settings().unwrap();
        std::env::remove_var("YAHOO_TOKEN_SECRETS_DIR");

        assert_eq!(settings.strategy.client_id, "secret-dir-client");
    }

    #[test]
    #[serial]
    fn test_strategy_env_overrides() {
        std::env::set_var("YAHOO_CLIENT_ID", "env-client");
        std::env::set_var("YAHOO_CLIENT_SECRET", "");
        std::env::set_var("PASS_REQ_TO_CALLBACK", "true");
        std::env::set_var("HTTP_TIMEOUT_SECONDS", "12");

        let mut settings = YahooTokenSettings::default();
        settings.strategy.client_secret = "from-file".to_string();
        YahooTokenSettings::apply_env_overrides(&mut settings);

        std::env::remove_var("YAHOO_CLIENT_ID");
        std::env::remove_var("YAHOO_CLIENT_SECRET");
        std::env::remove_var("PASS_REQ_TO_CALLBACK");
        std::env::remove_var("HTTP_TIMEOUT_SECONDS");

        assert_eq!(settings.strategy.client_id, "env-client");
        assert_eq!(settings.strategy.client_secret, "from-file");
        assert!(settings.strategy.pass_request_to_callback);
        assert_eq!(settings.http.timeout_seconds, Some(12));
    }

    #[test]
    fn test_logger_uses_configured_level() {
        let mut settings = YahooTokenSettings::default();
        settings.logging.level = "debug".to_string();

        let logger = settings.logger_builder().build();

        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }

    #[test]
    #[serial]
    fn test_rust_log_overrides_configured_level() {
        let previous = std::env::var("RUST_LOG").ok();
        std::env::set_var("RUST_LOG", "warn");

        let mut settings = YahooTokenSettings::default();
        settings.logging.level = "debug".to_string();
        YahooTokenSettings::apply_env_overrides(&mut settings);

        match previous {
            Some(value) => std::env::set_var("RUST_LOG", value),
            None => std::env::remove_var("RUST_LOG"),
        }

        assert_eq!(settings.logging.level, "warn");
        assert_eq!(
            settings.logger_builder().build().filter(),
            log::LevelFilter::Warn
        );
    }
}
