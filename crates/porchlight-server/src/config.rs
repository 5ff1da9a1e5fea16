//! Server configuration.

use std::path::PathBuf;

/// Configuration for the leasing assistant server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener.
    pub bind_addr: String,
    /// Path of the SQLite inventory database.
    pub db_path: PathBuf,
    /// Seed SQL applied when the database file is newly created.
    pub seed_path: PathBuf,
}

impl ServerConfig {
    /// Read configuration from environment variables with defaults.
    ///
    /// | Variable          | Default          |
    /// |-------------------|------------------|
    /// | `PORCHLIGHT_ADDR` | `127.0.0.1:8000` |
    /// | `PORCHLIGHT_DB`   | `porchlight.db`  |
    /// | `PORCHLIGHT_SEED` | `seed.sql`       |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("PORCHLIGHT_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8000".into()),
            db_path: std::env::var("PORCHLIGHT_DB")
                .unwrap_or_else(|_| "porchlight.db".into())
                .into(),
            seed_path: std::env::var("PORCHLIGHT_SEED")
                .unwrap_or_else(|_| "seed.sql".into())
                .into(),
        }
    }
}
