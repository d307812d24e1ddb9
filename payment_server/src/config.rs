use std::env;

use acb_connector::AcbConfig;
use log::*;

const DEFAULT_CPG_HOST: &str = "127.0.0.1";
const DEFAULT_CPG_PORT: u16 = 4640;
const DEFAULT_CPG_DATABASE_URL: &str = "sqlite://data/cafe_payments.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Credentials and endpoints for the ACB bank-transfer gateway.
    pub acb_config: AcbConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CPG_HOST.to_string(),
            port: DEFAULT_CPG_PORT,
            database_url: DEFAULT_CPG_DATABASE_URL.to_string(),
            acb_config: AcbConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("CPG_HOST").ok().unwrap_or_else(|| DEFAULT_CPG_HOST.into());
        let port = env::var("CPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for CPG_PORT. {e} Using the default, {DEFAULT_CPG_PORT}, instead."
                    );
                    DEFAULT_CPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_CPG_PORT);
        let database_url = env::var("CPG_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ CPG_DATABASE_URL is not set. Using the default, {DEFAULT_CPG_DATABASE_URL}, instead.");
            DEFAULT_CPG_DATABASE_URL.into()
        });
        let acb_config = AcbConfig::new_from_env_or_default();
        Self { host, port, database_url, acb_config }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4640);
        assert_eq!(config.database_url, "sqlite://data/cafe_payments.db");
    }
}
