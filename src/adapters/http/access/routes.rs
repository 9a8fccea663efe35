//! Axum router configuration for access endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_access_log, scan_membership, AccessAppState};

pub fn access_routes() -> Router<AccessAppState> {
    Router::new()
        .route("/api/memberships/by-qr/:id", get(scan_membership))
        .route("/api/access-log", get(list_access_log))
}

pub fn access_router(state: AccessAppState) -> Router {
    access_routes().with_state(state)
}
