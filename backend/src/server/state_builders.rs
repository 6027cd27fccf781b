//! Builders wiring repositories and the credential hasher into HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;

use board::domain::ports::{
    CommentRepository, CredentialHasher, GroupRepository, PostRepository,
};
use board::domain::{CommentService, GroupService, PostService};
use board::inbound::http::state::HttpState;
use board::outbound::credentials::Argon2CredentialHasher;
use board::outbound::memory::InMemoryBoardStore;
use board::outbound::persistence::{
    DieselCommentRepository, DieselGroupRepository, DieselPostRepository,
};

use super::ServerConfig;

/// Assemble the three services over one set of repositories.
fn services_over<G, P, C, H>(
    groups: Arc<G>,
    posts: Arc<P>,
    comments: Arc<C>,
    hasher: Arc<H>,
) -> HttpState
where
    G: GroupRepository + 'static,
    P: PostRepository + 'static,
    C: CommentRepository + 'static,
    H: CredentialHasher + 'static,
{
    HttpState::from_services(
        Arc::new(GroupService::new(groups.clone(), hasher.clone())),
        Arc::new(PostService::new(posts, groups, hasher.clone())),
        Arc::new(CommentService::new(comments, hasher)),
    )
}

/// Build the shared HTTP state: Diesel repositories when a pool is
/// configured, otherwise a fresh in-memory store.
///
/// # Errors
///
/// Returns an I/O error when the configured hash cost is rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<web::Data<HttpState>> {
    let hasher = Arc::new(
        Argon2CredentialHasher::new(config.hash_cost).map_err(io::Error::other)?,
    );
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "wiring board repositories");
            services_over(
                Arc::new(DieselGroupRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool.clone())),
                Arc::new(DieselCommentRepository::new(pool.clone())),
                hasher,
            )
        }
        None => {
            info!(store = "memory", "wiring board repositories");
            let store = Arc::new(InMemoryBoardStore::new());
            services_over(store.clone(), store.clone(), store, hasher)
        }
    };
    Ok(web::Data::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use board::domain::ports::{GroupCommand, GroupQuery};
    use board::domain::{NewGroup, PlainSecret};
    use board::outbound::credentials::HashCost;
    use rstest::rstest;
    use std::net::SocketAddr;

    fn config(cost: HashCost) -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))).with_hash_cost(cost)
    }

    #[rstest]
    #[tokio::test]
    async fn no_pool_selects_a_working_memory_store() {
        let state = build_http_state(&config(HashCost::MINIMAL)).expect("state builds");
        let group = NewGroup::try_new("hikers".into(), None, None, None).expect("valid group");
        let secret = PlainSecret::new("trail").expect("valid secret");

        let created = state.groups.create(group, secret).await.expect("created");
        let fetched = state.groups_query.get(created.id).await.expect("read");
        assert_eq!(fetched.map(|g| g.name), Some("hikers".to_owned()));
    }

    #[rstest]
    fn invalid_cost_is_an_io_error() {
        let cost = HashCost {
            memory_kib: 0,
            iterations: 0,
            lanes: 0,
        };
        assert!(build_http_state(&config(cost)).is_err());
    }
}
