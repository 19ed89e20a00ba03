use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub gateway_keys: String,
    pub resume_bucket: String,
    pub blob_op_timeout_secs: u64,
    pub resume_url_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            gateway_keys: std::env::var("GATEWAY_KEYS").unwrap_or_default(),
            resume_bucket: std::env::var("RESUME_BUCKET")
                .context("Cannot load RESUME_BUCKET env variable")?,
            blob_op_timeout_secs: std::env::var("BLOB_OP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("BLOB_OP_TIMEOUT_SECS must be a number")?,
            resume_url_ttl_minutes: std::env::var("RESUME_URL_TTL_MINUTES")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("RESUME_URL_TTL_MINUTES must be a number")?,
        })
    }
}
