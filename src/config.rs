//! Process configuration, read once at startup from the environment.
//!
//! A `.env` file is honored when present (loaded by the binary before
//! [`AppConfig::from_env`] runs). Everything has a working default so the
//! tool runs out of the box in a fresh checkout.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Output directory for authority keys and exported bundles.
pub const ENV_OUT_DIR: &str = "VOUCH_OUT_DIR";
/// Path of the registry database file.
pub const ENV_DB_PATH: &str = "VOUCH_DB_PATH";
/// Database busy timeout in milliseconds.
pub const ENV_DB_TIMEOUT_MS: &str = "VOUCH_DB_TIMEOUT_MS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub out_dir: PathBuf,
    pub db_path: PathBuf,
    pub db_timeout: Duration,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_db_path() -> PathBuf {
    PathBuf::from("registry.db")
}

fn default_db_timeout() -> Duration {
    Duration::from_millis(5000)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            db_path: default_db_path(),
            db_timeout: default_db_timeout(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let out_dir = env::var(ENV_OUT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_out_dir());

        let db_path = env::var(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_db_path());

        let db_timeout = env::var(ENV_DB_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(default_db_timeout);

        Self {
            out_dir,
            db_path,
            db_timeout,
        }
    }
}
