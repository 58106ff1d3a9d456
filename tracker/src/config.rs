//! # Config
//!
//! Define and implement config options for module

use crate::sampler::DEFAULT_THRESHOLD_METERS;
use crate::tasks::source::{DEFAULT_DISTANCE_INTERVAL_METERS, DEFAULT_TIME_INTERVAL_MS};
use config::{ConfigError, Environment};
use dotenv::dotenv;
use serde::Deserialize;

/// struct holding configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// minimum displacement in meters for a fix to enter the path
    pub threshold_meters: f64,

    /// minimum delay in milliseconds between two reported fixes
    pub time_interval_ms: u64,

    /// minimum displacement in meters between two reported fixes
    pub distance_interval_meters: f64,

    /// table raw fixes are stored in
    pub table_name: String,

    /// JSON lines file to store raw fixes in, kept in memory if empty
    pub storage_path: String,

    /// GeoJSON file to render the map into, logged if empty
    pub render_path: String,

    /// file to read fixes from, stdin if empty
    pub fix_source: String,

    /// path to log configuration YAML file
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        log::warn!("(default) Creating Config object with default values.");
        Self::new()
    }
}

impl Config {
    /// Default values for Config
    pub fn new() -> Self {
        Config {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            time_interval_ms: DEFAULT_TIME_INTERVAL_MS,
            distance_interval_meters: DEFAULT_DISTANCE_INTERVAL_METERS,
            table_name: String::from("localisation"),
            storage_path: String::from(""),
            render_path: String::from(""),
            fix_source: String::from(""),
            log_config: String::from("log4rs.yaml"),
        }
    }

    /// Create a new `Config` object using environment variables
    pub fn try_from_env() -> Result<Self, ConfigError> {
        // read .env file if present
        dotenv().ok();
        let default_config = Config::default();

        let config: Config = config::Config::builder()
            .set_default("threshold_meters", default_config.threshold_meters)?
            .set_default("time_interval_ms", default_config.time_interval_ms)?
            .set_default(
                "distance_interval_meters",
                default_config.distance_interval_meters,
            )?
            .set_default("table_name", default_config.table_name)?
            .set_default("storage_path", default_config.storage_path)?
            .set_default("render_path", default_config.render_path)?
            .set_default("fix_source", default_config.fix_source)?
            .set_default("log_config", default_config.log_config)?
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the numeric options
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_meters.is_finite() || self.threshold_meters < 0.0 {
            return Err(ConfigError::Message(format!(
                "invalid threshold_meters: {}",
                self.threshold_meters
            )));
        }

        if !self.distance_interval_meters.is_finite() || self.distance_interval_meters < 0.0 {
            return Err(ConfigError::Message(format!(
                "invalid distance_interval_meters: {}",
                self.distance_interval_meters
            )));
        }

        if self.table_name.is_empty() {
            return Err(ConfigError::Message(String::from("empty table_name")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;
    use serial_test::serial;

    const KEYS: [&str; 8] = [
        "THRESHOLD_METERS",
        "TIME_INTERVAL_MS",
        "DISTANCE_INTERVAL_METERS",
        "TABLE_NAME",
        "STORAGE_PATH",
        "RENDER_PATH",
        "FIX_SOURCE",
        "LOG_CONFIG",
    ];

    fn clear_env() {
        for key in KEYS {
            std::env::remove_var(key);
        }
    }

    #[tokio::test]
    async fn test_config_from_default() {
        crate::get_log_handle().await;
        ut_info!("(test_config_from_default) Start.");

        let config = Config::default();

        assert_eq!(config.threshold_meters, 10.0);
        assert_eq!(config.time_interval_ms, 10000);
        assert_eq!(config.distance_interval_meters, 5.0);
        assert_eq!(config.table_name, String::from("localisation"));
        assert_eq!(config.storage_path, String::from(""));
        assert_eq!(config.render_path, String::from(""));
        assert_eq!(config.fix_source, String::from(""));
        assert_eq!(config.log_config, String::from("log4rs.yaml"));
        assert!(config.validate().is_ok());

        ut_info!("(test_config_from_default) Success.");
    }

    #[tokio::test]
    #[serial]
    async fn test_config_from_env() {
        crate::get_log_handle().await;
        ut_info!("(test_config_from_env) Start.");

        std::env::set_var("THRESHOLD_METERS", "5");
        std::env::set_var("TIME_INTERVAL_MS", "1000");
        std::env::set_var("DISTANCE_INTERVAL_METERS", "1.0");
        std::env::set_var("TABLE_NAME", "locations");
        std::env::set_var("STORAGE_PATH", "/tmp/locations.jsonl");
        std::env::set_var("RENDER_PATH", "/tmp/map.geojson");
        std::env::set_var("FIX_SOURCE", "fixes.csv");
        std::env::set_var("LOG_CONFIG", "config_file.yaml");

        let config = Config::try_from_env();
        clear_env();
        assert!(config.is_ok());
        let config = config.unwrap();

        assert_eq!(config.threshold_meters, 5.0);
        assert_eq!(config.time_interval_ms, 1000);
        assert_eq!(config.distance_interval_meters, 1.0);
        assert_eq!(config.table_name, String::from("locations"));
        assert_eq!(config.storage_path, String::from("/tmp/locations.jsonl"));
        assert_eq!(config.render_path, String::from("/tmp/map.geojson"));
        assert_eq!(config.fix_source, String::from("fixes.csv"));
        assert_eq!(config.log_config, String::from("config_file.yaml"));

        ut_info!("(test_config_from_env) Success.");
    }

    #[tokio::test]
    #[serial]
    async fn test_config_from_env_invalid_threshold() {
        crate::get_log_handle().await;
        ut_info!("(test_config_from_env_invalid_threshold) Start.");

        std::env::set_var("THRESHOLD_METERS", "-1");
        let config = Config::try_from_env();
        clear_env();
        assert!(config.is_err());

        ut_info!("(test_config_from_env_invalid_threshold) Success.");
    }

    #[test]
    fn test_validate() {
        let mut config = Config::new();
        config.distance_interval_meters = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.table_name = String::new();
        assert!(config.validate().is_err());
    }
}
