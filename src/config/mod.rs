//! Configuration module for the Bump backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared admin PIN authorizing mutating operations (required in production)
    pub admin_pin: Option<String>,
    /// Directory holding the JSON collection files
    pub data_dir: PathBuf,
    /// Directory holding uploaded offer images
    pub uploads_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Dashboard title surfaced by GET /api/config
    pub app_title: String,
    /// Due date surfaced by GET /api/config
    pub due_date: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_pin = env::var("BUMP_ADMIN_PIN").ok();

        let data_dir: PathBuf = env::var("BUMP_DATA_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let uploads_dir = env::var("BUMP_UPLOADS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("uploads"));

        let bind_addr = env::var("BUMP_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BUMP_BIND_ADDR format");

        let log_level = env::var("BUMP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let app_title = env::var("BUMP_APP_TITLE").unwrap_or_else(|_| "Baby Dashboard".to_string());

        let due_date = env::var("BUMP_DUE_DATE").ok();

        Self {
            admin_pin,
            data_dir,
            uploads_dir,
            bind_addr,
            log_level,
            app_title,
            due_date,
        }
    }
}
