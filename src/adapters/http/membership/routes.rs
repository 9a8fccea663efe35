//! Axum router configuration for membership endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    apply_discount, calculate_details, create_membership, delete_membership, get_membership,
    list_memberships, renew_membership, MembershipAppState,
};

/// Membership routes, mounted at `/memberships/api`.
///
/// # Routes
/// - `POST /calculate-details` - Period and price preview
/// - `GET /` / `POST /` - List / purchase
/// - `GET /:id` / `DELETE /:id` - Detail / admin removal
/// - `POST /:id/renew` - New period
/// - `POST /:id/discount` - Re-apply a discount
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/calculate-details", post(calculate_details))
        .route("/", get(list_memberships).post(create_membership))
        .route("/:id", get(get_membership).delete(delete_membership))
        .route("/:id/renew", post(renew_membership))
        .route("/:id/discount", post(apply_discount))
}

/// Complete membership module router with its state applied.
pub fn membership_router(state: MembershipAppState) -> Router {
    Router::new()
        .nest("/memberships/api", membership_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryMembershipStore;
    use crate::adapters::receipts::LocalReceiptGenerator;
    use crate::domain::foundation::{MembershipTypeId, Money};
    use crate::domain::membership::{MembershipDuration, MembershipType};

    async fn app(dir: &TempDir) -> (Router, InMemoryMembershipStore) {
        let store = InMemoryMembershipStore::new();
        store
            .insert_type(MembershipType {
                id: MembershipTypeId::new(1),
                name: "Individual".to_string(),
                duration: MembershipDuration::months(1).unwrap(),
                max_members: 1,
                base_price: Money::from_pesos(500).unwrap(),
            })
            .await;
        let state = MembershipAppState {
            membership_repository: Arc::new(store.clone()),
            receipt_generator: Arc::new(LocalReceiptGenerator::new(dir.path(), "")),
        };
        (membership_router(state), store)
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn calculate_details_returns_end_date_and_price() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let response = app
            .oneshot(post_json(
                "/memberships/api/calculate-details",
                serde_json::json!({
                    "id_tipo_membresia": 1,
                    "fecha_inicio": "2024-01-15",
                    "descuento": 10
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["fecha_fin"], "2024-02-15");
        assert_eq!(body["precio_final"], "450.00");
        assert_eq!(body["precio_letra"], "cuatrocientos cincuenta pesos");
    }

    #[tokio::test]
    async fn missing_start_date_is_400_naming_the_field() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let response = app
            .oneshot(post_json(
                "/memberships/api/calculate-details",
                serde_json::json!({"id_tipo_membresia": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert!(body["error"].as_str().unwrap().contains("fecha_inicio"));
    }

    #[tokio::test]
    async fn create_then_apply_discount() {
        let dir = TempDir::new().unwrap();
        let (app, store) = app(&dir).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/memberships/api",
                serde_json::json!({
                    "id_cliente": 3,
                    "nombre": "Carlos Ruiz",
                    "id_tipo_membresia": 1,
                    "fecha_inicio": "2024-01-15"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json(response).await;
        assert_eq!(created["precio_final"], "500.00");
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(post_json(
                &format!("/memberships/api/{}/discount", id),
                serde_json::json!({"descuento": 10}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await["precio_final"], "450.00");
        assert_eq!(store.membership_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_membership_is_404() {
        let dir = TempDir::new().unwrap();
        let (app, _) = app(&dir).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/memberships/api/77")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], "Membership 77 not found");
    }
}
