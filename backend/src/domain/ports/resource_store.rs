//! Error type shared by the group, post and comment repositories.

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource store adapters.
    pub enum ResourceStoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "resource store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "resource store query failed: {message}",
    }
}
