//! Scale CRUD routes, mounted under /v1 by the server.

use crate::handlers::scales::{create, delete as delete_handler, list, show, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn scale_routes(state: AppState) -> Router {
    Router::new()
        .route("/scales", get(list).post(create))
        .route(
            "/scales/:id",
            get(show).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
