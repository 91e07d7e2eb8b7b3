use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub mongo_host: String,
    pub mongo_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("USER_SERVICE_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid USER_SERVICE_HOST: {e}"))?;

        let port: u16 = env_or("USER_SERVICE_PORT", "8080")
            .parse()
            .map_err(|e| format!("Invalid USER_SERVICE_PORT: {e}"))?;

        let mongo_host = env_or("MONGO_HOST", "127.0.0.1");

        let mongo_port: u16 = env_or("MONGO_PORT", "27017")
            .parse()
            .map_err(|e| format!("Invalid MONGO_PORT: {e}"))?;

        let log_level = env_or("USER_SERVICE_LOG_LEVEL", "debug");

        Ok(Config {
            host,
            port,
            mongo_host,
            mongo_port,
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
