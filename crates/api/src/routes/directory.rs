use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/status", get(handlers::directory::get_status))
        .route("/api/reload", post(handlers::directory::reload))
        .route("/api/candidates", get(handlers::directory::list_candidates))
        .route("/api/engineers", get(handlers::directory::list_engineers))
}
