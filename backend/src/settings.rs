//! Process settings loaded via OrthoConfig.
//!
//! Every field can be set through a `BOARD_`-prefixed environment variable
//! (`BOARD_PORT`, `BOARD_DATABASE_URL`, ...) or the matching CLI flag. Unset
//! fields fall back to the defaults documented on each accessor.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::credentials::HashCost;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Configuration values for the board server.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOARD")]
pub struct BoardSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
    /// Argon2id memory cost in KiB.
    pub hash_memory_kib: Option<u32>,
    /// Argon2id pass count.
    pub hash_iterations: Option<u32>,
    /// Argon2id parallelism.
    pub hash_lanes: Option<u32>,
}

impl BoardSettings {
    /// Host to bind, `0.0.0.0` unless configured.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind, 8080 unless configured.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve the configured host and port to a socket address.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the host does not resolve.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address for {}:{}", self.host(), self.port()),
                )
            })
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        let config = PoolConfig::new(url);
        Some(match self.pool_max_size {
            Some(size) => config.with_max_size(size),
            None => config,
        })
    }

    /// Hash cost with unset fields taken from [`HashCost::RECOMMENDED`].
    pub fn hash_cost(&self) -> HashCost {
        let base = HashCost::RECOMMENDED;
        HashCost {
            memory_kib: self.hash_memory_kib.unwrap_or(base.memory_kib),
            iterations: self.hash_iterations.unwrap_or(base.iterations),
            lanes: self.hash_lanes.unwrap_or(base.lanes),
        }
    }
}
