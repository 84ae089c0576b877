//! Configuration module for the bridge web service

use anyhow::Result;
use std::{env, net::SocketAddr, path::PathBuf};

/// Configuration for the bridge web service
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file path
    pub db_path: PathBuf,

    /// Web service bind address
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        let db_path = match env::var("BRIDGE_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                let home = dirs::home_dir().ok_or(anyhow::anyhow!("Home directory not found"))?;
                home.join(".cache/megabridge/bridge.db")
            }
        };
        let listen_addr = env::var("BRIDGE_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse::<SocketAddr>()?;

        Ok(Self {
            db_path,
            listen_addr,
        })
    }
}
