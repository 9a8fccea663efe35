//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own router and state; [`app_router`] merges
//! them and applies the shared tower layers.

pub mod access;
pub mod error;
pub mod membership;
pub mod rooms;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::ports::{
    AccessLogRepository, BookingRepository, MembershipRepository, Notifier, ReceiptGenerator,
};

pub use access::{access_router, AccessAppState};
pub use error::{ApiError, ErrorResponse};
pub use membership::{membership_router, MembershipAppState};
pub use rooms::{rooms_router, RoomsAppState};

/// Every port the HTTP surface needs.
#[derive(Clone)]
pub struct AppPorts {
    pub memberships: Arc<dyn MembershipRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub access_log: Arc<dyn AccessLogRepository>,
    pub receipts: Arc<dyn ReceiptGenerator>,
    pub notifier: Arc<dyn Notifier>,
}

/// Full application router with tracing, CORS, timeout and request ids.
pub fn app_router(ports: AppPorts, server: &ServerConfig) -> Router {
    let membership = membership_router(MembershipAppState {
        membership_repository: ports.memberships.clone(),
        receipt_generator: ports.receipts.clone(),
    });
    let rooms = rooms_router(RoomsAppState {
        booking_repository: ports.bookings,
        receipt_generator: ports.receipts,
        notifier: ports.notifier,
    });
    let access = access_router(AccessAppState {
        membership_repository: ports.memberships,
        access_log_repository: ports.access_log,
    });

    Router::new()
        .route("/health", get(health))
        .merge(membership)
        .merge(rooms)
        .merge(access)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.allowed_origins()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Allows any origin when none are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::adapters::memory::{
        InMemoryAccessLog, InMemoryBookingStore, InMemoryMembershipStore, RecordingNotifier,
    };
    use crate::adapters::receipts::LocalReceiptGenerator;

    fn ports(dir: &TempDir) -> AppPorts {
        AppPorts {
            memberships: Arc::new(InMemoryMembershipStore::new()),
            bookings: Arc::new(InMemoryBookingStore::new()),
            access_log: Arc::new(InMemoryAccessLog::new()),
            receipts: Arc::new(LocalReceiptGenerator::new(dir.path(), "")),
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    #[tokio::test]
    async fn health_returns_ok_with_request_id() {
        let dir = TempDir::new().unwrap();
        let app = app_router(ports(&dir), &ServerConfig::default());

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn invalid_origins_are_skipped() {
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
