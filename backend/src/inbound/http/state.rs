//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CommentCommand, CommentQuery, GroupCommand, GroupQuery, PostCommand, PostQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub groups: Arc<dyn GroupCommand>,
    pub groups_query: Arc<dyn GroupQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
}

impl HttpState {
    /// Build state from services that implement both halves of each
    /// command/query pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use board::domain::{CommentService, GroupService, PostService};
    /// use board::inbound::http::state::HttpState;
    /// use board::outbound::credentials::{Argon2CredentialHasher, HashCost};
    /// use board::outbound::memory::InMemoryBoardStore;
    ///
    /// let store = Arc::new(InMemoryBoardStore::new());
    /// let hasher = Arc::new(Argon2CredentialHasher::new(HashCost::MINIMAL).expect("cost"));
    /// let state = HttpState::from_services(
    ///     Arc::new(GroupService::new(store.clone(), hasher.clone())),
    ///     Arc::new(PostService::new(store.clone(), store.clone(), hasher.clone())),
    ///     Arc::new(CommentService::new(store, hasher)),
    /// );
    /// let _groups = state.groups.clone();
    /// ```
    pub fn from_services<G, P, C>(groups: Arc<G>, posts: Arc<P>, comments: Arc<C>) -> Self
    where
        G: GroupCommand + GroupQuery + 'static,
        P: PostCommand + PostQuery + 'static,
        C: CommentCommand + CommentQuery + 'static,
    {
        Self {
            groups: groups.clone(),
            groups_query: groups,
            posts: posts.clone(),
            posts_query: posts,
            comments: comments.clone(),
            comments_query: comments,
        }
    }
}
