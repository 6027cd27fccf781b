//! HTTP inbound adapter exposing the board's REST endpoints.

pub mod comments;
pub mod error;
pub mod groups;
pub mod health;
pub mod posts;
pub mod responses;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every board route plus the extractor configs that render
/// malformed input as `invalid_request`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .configure(groups::configure)
        .configure(posts::configure)
        .configure(comments::configure);
}
