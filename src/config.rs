use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_AUTO_RU_URL: &str = "http://moto.auto.ru/motorcycle/";
pub const DEFAULT_AVITO_URL: &str = "https://www.avito.ru/moskva/mototsikly_i_mototehnika";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.10; rv:40.0) Gecko/20100101 Firefox/40.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub auto_ru_url: String,
    pub avito_url: String,
    pub fetch_timeout_secs: u64,
    pub fetch_retries: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auto_ru_url: DEFAULT_AUTO_RU_URL.to_string(),
            avito_url: DEFAULT_AVITO_URL.to_string(),
            fetch_timeout_secs: 5,
            fetch_retries: 0,
        }
    }
}

impl AppConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&std::env::vars().collect())
}

pub fn load_config_from(vars: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    match vars.get("PORT").filter(|v| !v.is_empty()) {
        Some(port) => config.port = parse_var("PORT", port)?,
        None => warn!("PORT is not set, listening on {}", config.port),
    }
    if let Some(url) = vars.get("AUTO_RU_URL") {
        config.auto_ru_url = url.clone();
    }
    if let Some(url) = vars.get("AVITO_URL") {
        config.avito_url = url.clone();
    }
    if let Some(secs) = vars.get("FETCH_TIMEOUT_SECS") {
        config.fetch_timeout_secs = parse_var("FETCH_TIMEOUT_SECS", secs)?;
    }
    if let Some(retries) = vars.get("FETCH_RETRIES") {
        config.fetch_retries = parse_var("FETCH_RETRIES", retries)?;
    }

    Ok(config)
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let config = load_config_from(&HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auto_ru_url, DEFAULT_AUTO_RU_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch_retries, 0);
    }

    #[test]
    fn reads_overrides() {
        let config = load_config_from(&vars(&[
            ("PORT", "9000"),
            ("AVITO_URL", "http://localhost:1/avito"),
            ("FETCH_TIMEOUT_SECS", "2"),
            ("FETCH_RETRIES", "1"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.avito_url, "http://localhost:1/avito");
        assert_eq!(config.fetch_timeout_secs, 2);
        assert_eq!(config.fetch_retries, 1);
    }

    #[test]
    fn rejects_bad_port() {
        let err = load_config_from(&vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
