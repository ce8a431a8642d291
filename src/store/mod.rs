//! Flat-file persistence module.
//!
//! The JSON files on disk are the source of truth for all application data.

mod repository;

pub use repository::*;

use crate::config::Config;

/// Create the data and uploads directories if they don't exist.
pub async fn init_store(config: &Config) -> std::io::Result<()> {
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    Ok(())
}
