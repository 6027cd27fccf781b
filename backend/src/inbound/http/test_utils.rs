//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::Trace;
use crate::domain::{CommentService, GroupService, PostService};
use crate::inbound::http::state::HttpState;
use crate::outbound::credentials::{Argon2CredentialHasher, HashCost};
use crate::outbound::memory::InMemoryBoardStore;

/// Build handler state over a fresh in-memory store and the cheapest
/// Argon2id profile.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryBoardStore::new());
    let hasher =
        Arc::new(Argon2CredentialHasher::new(HashCost::MINIMAL).expect("minimal cost is valid"));
    HttpState::from_services(
        Arc::new(GroupService::new(store.clone(), hasher.clone())),
        Arc::new(PostService::new(store.clone(), store.clone(), hasher.clone())),
        Arc::new(CommentService::new(store, hasher)),
    )
}

/// Full board application over [`in_memory_state`], wrapped in the trace
/// middleware.
pub fn board_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(in_memory_state()))
        .wrap(Trace)
        .configure(crate::inbound::http::configure)
}
