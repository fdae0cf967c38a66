use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", get(handlers::slots::get_slots))
        .route("/api/view", put(handlers::slots::update_view))
        .route("/api/slots/:id/select", post(handlers::slots::select_slot))
        .route(
            "/api/selection",
            get(handlers::slots::get_selection).delete(handlers::slots::clear_selection),
        )
}
