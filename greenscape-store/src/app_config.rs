use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Minimum group size for the group discount
    #[serde(default = "default_discount_min")]
    pub group_discount_min: i32,
    /// Flat unit-price reduction once the group threshold is met
    #[serde(default = "default_discount_rate")]
    pub group_discount_rate: f64,
    /// Static conversion rate; prices are not fetched live
    #[serde(default = "default_ksh_rate")]
    pub usd_to_ksh_rate: f64,
    #[serde(default = "default_submission_timeout")]
    pub submission_timeout_seconds: u64,
    #[serde(default = "default_autosave")]
    pub draft_autosave_seconds: u64,
    #[serde(default = "default_dismiss")]
    pub status_dismiss_seconds: u64,
}

fn default_discount_min() -> i32 {
    7
}
fn default_discount_rate() -> f64 {
    0.15
}
fn default_ksh_rate() -> f64 {
    150.0
}
fn default_submission_timeout() -> u64 {
    10
}
fn default_autosave() -> u64 {
    30
}
fn default_dismiss() -> u64 {
    5
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            group_discount_min: default_discount_min(),
            group_discount_rate: default_discount_rate(),
            usd_to_ksh_rate: default_ksh_rate(),
            submission_timeout_seconds: default_submission_timeout(),
            draft_autosave_seconds: default_autosave(),
            status_dismiss_seconds: default_dismiss(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Path of the local key/value file
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "greenscape_store.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `GREENSCAPE__BUSINESS_RULES__GROUP_DISCOUNT_MIN=5`
            .add_source(config::Environment::with_prefix("GREENSCAPE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
