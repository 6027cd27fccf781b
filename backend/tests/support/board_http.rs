//! Live-server harness for behavioural tests of the board API.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. [`WorldFixture`] stops the server on
//! drop, even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use awc::Client;
use board::Trace;
use board::domain::{CommentService, GroupService, PostService};
use board::inbound::http::state::HttpState;
use board::outbound::credentials::{Argon2CredentialHasher, HashCost};
use board::outbound::memory::InMemoryBoardStore;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct BoardWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) group_id: Option<i64>,
    pub(crate) created_group: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<BoardWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryBoardStore::new());
    let hasher =
        Arc::new(Argon2CredentialHasher::new(HashCost::MINIMAL).expect("minimal cost is valid"));
    HttpState::from_services(
        Arc::new(GroupService::new(store.clone(), hasher.clone())),
        Arc::new(PostService::new(store.clone(), store.clone(), hasher.clone())),
        Arc::new(CommentService::new(store, hasher)),
    )
}

async fn spawn_board_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let state = web::Data::new(in_memory_state());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(board::inbound::http::configure)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// Start a board server on an ephemeral port.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();
    let (base_url, server) = local
        .block_on(&runtime, spawn_board_server())
        .expect("board server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(BoardWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
            group_id: None,
            created_group: None,
        })),
    }
}

/// Send one JSON request and record its status and body in the world.
pub(crate) fn perform(world: &SharedWorld, method: Method, path: &str, payload: Option<Value>) {
    let (status, body) = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let request = Client::default().request(method, url);
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect("json request"),
                None => request.send().await.expect("request"),
            };
            let status = response.status().as_u16();
            let bytes = response.body().await.expect("body");
            let body = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);
            (status, body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_body = Some(body);
}
