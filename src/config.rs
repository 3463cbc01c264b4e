use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;

/// Built once in `main` and passed explicitly; nothing reads the
/// environment after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub cert_service_url: String,
    pub internal_api_secret: String,
    pub exam_bank_dir: String,
    pub public_rps: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let cert_service_url = get_env("CERT_SERVICE_URL")?;
        url::Url::parse(&cert_service_url)
            .map_err(|e| Error::Config(format!("Invalid CERT_SERVICE_URL: {}", e)))?;

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            cert_service_url,
            internal_api_secret: get_env("INTERNAL_API_SECRET")?,
            exam_bank_dir: env::var("EXAM_BANK_DIR").unwrap_or_else(|_| "data/exam".to_string()),
            public_rps: get_env_parse("PUBLIC_RPS")?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}
