use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Bearer credential attached to every provider request
    pub token: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchSettings {
    #[serde(default)]
    pub fallback_enabled: bool,
    #[serde(default = "default_logo_url_template")]
    pub logo_url_template: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            fallback_enabled: false,
            logo_url_template: default_logo_url_template(),
        }
    }
}

fn default_search_path() -> String { "/flights/search".to_string() }
fn default_timeout_seconds() -> u64 { 30 }
fn default_logo_url_template() -> String { "https://pics.avs.io/200/80/{code}.png".to_string() }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SKYFARE__SEARCH__FALLBACK_ENABLED=true`
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
