//! Route definitions for the server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

/// Create the application router: the document API behind the identity
/// resolver, plus the unauthenticated handshake routes.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/files", get(handlers::list_files).post(handlers::create_file))
        .route("/files/{id}", delete(handlers::delete_file))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::require_identity,
        ));

    Router::new()
        .nest("/api", api)
        .merge(crate::auth::handshake::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
