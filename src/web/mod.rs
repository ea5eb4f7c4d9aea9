//! HTTP surface: routes, handlers, page rendering and the server loop.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod render;
pub mod server;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::io::store::RecordStore;
use crate::service::TaskService;

/// Shared state handed to every handler
pub type AppState<S> = Arc<TaskService<S>>;

/// Build the router over a task service.
pub fn create_router<S: RecordStore + 'static>(service: AppState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::index::<S>))
        .route("/add", post(handlers::add_task::<S>))
        .route("/update/{id}", post(handlers::update_task::<S>))
        .route("/delete/{id}", post(handlers::delete_task::<S>))
        .route("/clear", post(handlers::clear_tasks::<S>))
        .route("/undo", post(handlers::undo::<S>))
        .route("/last-action", get(handlers::last_action::<S>))
        .route("/static/app.js", get(handlers::app_js))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
