//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use board::outbound::credentials::HashCost;
use board::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) hash_cost: HashCost,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Serve on `bind_addr` over the in-memory store with the recommended
    /// hash cost.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            hash_cost: HashCost::RECOMMENDED,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Persist through PostgreSQL instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the Argon2id cost used for new digests.
    #[must_use]
    pub fn with_hash_cost(mut self, cost: HashCost) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_to_memory_store_and_recommended_cost() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));
        assert!(config.db_pool.is_none());
        assert_eq!(config.hash_cost, HashCost::RECOMMENDED);
        assert_eq!(config.bind_addr().port(), 0);
    }

    #[rstest]
    fn hash_cost_can_be_lowered() {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
            .with_hash_cost(HashCost::MINIMAL);
        assert_eq!(config.hash_cost, HashCost::MINIMAL);
    }
}
