pub mod config;
pub mod db;
pub mod error;
pub mod messages;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::UserStore;
use crate::service::UserService;
use crate::state::{AppState, SharedState};

pub fn build_app(store: Arc<dyn UserStore>) -> Router {
    let state: SharedState = Arc::new(AppState {
        service: UserService::new(store),
    });

    Router::new()
        .merge(routes::rpc_routes())
        .route("/health", axum::routing::get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
