//! End-to-end checks of the JSON API over in-memory adapters.
//!
//! Each test builds the full router (layers included) and drives it with
//! `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Days, NaiveDate};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use recepcion::adapters::http::{app_router, AppPorts};
use recepcion::adapters::memory::{
    InMemoryAccessLog, InMemoryBookingStore, InMemoryMembershipStore, RecordingNotifier,
};
use recepcion::adapters::receipts::LocalReceiptGenerator;
use recepcion::config::ServerConfig;
use recepcion::domain::access::AccessResult;
use recepcion::domain::foundation::{
    today, ClientId, Discount, MembershipId, MembershipTypeId, Money, RoomId, Timestamp,
};
use recepcion::domain::membership::{ActiveMembership, MembershipDuration, MembershipType};
use recepcion::domain::rooms::{Room, RoomStatus};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct FrontDesk {
    app: Router,
    memberships: InMemoryMembershipStore,
    bookings: InMemoryBookingStore,
    access_log: InMemoryAccessLog,
    notifier: RecordingNotifier,
    _storage: TempDir,
}

impl FrontDesk {
    async fn new() -> Self {
        let storage = TempDir::new().unwrap();
        let memberships = InMemoryMembershipStore::new();
        memberships
            .insert_type(MembershipType {
                id: MembershipTypeId::new(1),
                name: "Individual".to_string(),
                duration: MembershipDuration::months(1).unwrap(),
                max_members: 1,
                base_price: Money::from_pesos(500).unwrap(),
            })
            .await;
        let bookings = InMemoryBookingStore::new();
        bookings
            .insert_room(Room {
                id: RoomId::new(1),
                number: "101".to_string(),
                room_type: "Doble".to_string(),
                price_per_night: Money::from_pesos(850).unwrap(),
                status: RoomStatus::Available,
            })
            .await;
        let access_log = InMemoryAccessLog::new();
        let notifier = RecordingNotifier::new();

        let ports = AppPorts {
            memberships: Arc::new(memberships.clone()),
            bookings: Arc::new(bookings.clone()),
            access_log: Arc::new(access_log.clone()),
            receipts: Arc::new(LocalReceiptGenerator::new(storage.path(), "/static")),
            notifier: Arc::new(notifier.clone()),
        };

        Self {
            app: app_router(ports, &ServerConfig::default()),
            memberships,
            bookings,
            access_log,
            notifier,
            _storage: storage,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response: Response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn membership_ending(&self, id: i64, end_date: NaiveDate) {
        self.memberships
            .insert_membership(ActiveMembership {
                id: MembershipId::new(id),
                client_id: ClientId::new(1),
                holder_name: "Carlos Ruiz".to_string(),
                membership_type_id: MembershipTypeId::new(1),
                type_name: "Individual".to_string(),
                start_date: end_date.checked_sub_days(Days::new(31)).unwrap(),
                end_date,
                discount: Discount::ZERO,
                final_price: Money::from_pesos(500).unwrap(),
                qr_path: None,
                members: vec![],
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            })
            .await;
    }
}

fn guest(check_in: &str, check_out: &str) -> Value {
    json!({
        "id_habitacion": 1,
        "nombre": "Ana López",
        "telefono": "55 1234 5678",
        "email": "ana@example.com",
        "fecha_entrada": check_in,
        "fecha_salida": check_out,
    })
}

// =============================================================================
// Memberships
// =============================================================================

#[tokio::test]
async fn individual_month_with_ten_percent_discount() {
    let desk = FrontDesk::new().await;

    let (status, body) = desk
        .post(
            "/memberships/api",
            json!({
                "id_cliente": 7,
                "nombre": "Carlos Ruiz",
                "id_tipo_membresia": 1,
                "fecha_inicio": "2024-01-15",
                "descuento": 10
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["fecha_fin"], "2024-02-15");
    assert_eq!(body["precio_final"], "450.00");
    assert!(body["qr"].as_str().unwrap().starts_with("/static/qr/membresia_"));

    let (status, list) = desk.get("/memberships/api").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn january_31_plus_one_month_clamps_to_leap_day() {
    let desk = FrontDesk::new().await;

    let (status, body) = desk
        .post(
            "/memberships/api/calculate-details",
            json!({"id_tipo_membresia": 1, "fecha_inicio": "2024-01-31"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fecha_fin"], "2024-02-29");
    assert_eq!(body["precio_final"], "500.00");
}

#[tokio::test]
async fn out_of_range_discount_is_400() {
    let desk = FrontDesk::new().await;

    let (status, body) = desk
        .post(
            "/memberships/api/calculate-details",
            json!({"id_tipo_membresia": 1, "fecha_inicio": "2024-01-15", "descuento": 120}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_membership_type_is_404() {
    let desk = FrontDesk::new().await;

    let (status, body) = desk
        .post(
            "/memberships/api/calculate-details",
            json!({"id_tipo_membresia": 9, "fecha_inicio": "2024-01-15"}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Membership type 9 not found");
}

// =============================================================================
// QR access
// =============================================================================

#[tokio::test]
async fn scan_of_membership_ending_tomorrow_is_allowed_and_logged_once() {
    let desk = FrontDesk::new().await;
    let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
    desk.membership_ending(3, tomorrow).await;

    let (status, body) = desk.get("/api/memberships/by-qr/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["acceso_permitido"], true);
    assert_eq!(body["data"]["resultado"], "allowed");
    assert_eq!(body["data"]["membresia"]["status"], "expiring");
    assert_eq!(body["data"]["membresia"]["holder_name"], "Carlos Ruiz");
    let entries = desk.access_log.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, AccessResult::Allowed);
}

#[tokio::test]
async fn scan_of_membership_ended_yesterday_is_denied_and_logged_once() {
    let desk = FrontDesk::new().await;
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
    desk.membership_ending(4, yesterday).await;

    let (status, body) = desk.get("/api/memberships/by-qr/4").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["acceso_permitido"], false);
    assert_eq!(body["data"]["membresia"]["status"], "expired");
    let entries = desk.access_log.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].result, AccessResult::Denied);

    let (status, log) = desk.get("/api/access-log").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(log["total"], 1);
    assert_eq!(log["entries"][0]["resultado"], "denied");
}

// =============================================================================
// Rooms
// =============================================================================

#[tokio::test]
async fn identical_window_is_unavailable_and_touching_window_is_free() {
    let desk = FrontDesk::new().await;
    let (status, _) = desk
        .post("/api/reservations", guest("2024-03-01T14:00", "2024-03-03T12:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, same) = desk
        .get("/api/rooms/1/availability?check_in=2024-03-01T14:00&check_out=2024-03-03T12:00")
        .await;
    assert_eq!(same["available"], false);

    let (_, touching) = desk
        .get("/api/rooms/1/availability?check_in=2024-03-03T12:00&check_out=2024-03-04T12:00")
        .await;
    assert_eq!(touching["available"], true);
}

#[tokio::test]
async fn reservation_to_rental_to_checkout() {
    let desk = FrontDesk::new().await;

    let (status, reservation) = desk
        .post("/api/reservations", guest("2024-03-01T14:00", "2024-03-03T12:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(reservation["recibo"]
        .as_str()
        .unwrap()
        .starts_with("/static/receipts/reservacion_"));
    let reservation_id = reservation["id"].as_i64().unwrap();

    let mut rental_body = guest("2024-03-01T14:00", "2024-03-03T12:00");
    rental_body["tipo_pago"] = json!("tarjeta");
    rental_body["monto"] = json!("1700.00");
    rental_body["id_reservacion"] = json!(reservation_id);
    let (status, rental) = desk.post("/api/rentals", rental_body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rental["tipo_pago"], "card");
    assert_eq!(
        desk.bookings.room(RoomId::new(1)).await.unwrap().status,
        RoomStatus::Occupied
    );

    let rental_id = rental["id"].as_i64().unwrap();
    let (status, finished) = desk
        .post(&format!("/api/rentals/{}/finish", rental_id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["estado"], "finished");

    let (status, room) = desk.post("/api/rooms/1/available", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["estado"], "available");
}

#[tokio::test]
async fn cancelled_reservation_frees_the_room() {
    let desk = FrontDesk::new().await;
    let (_, reservation) = desk
        .post("/api/reservations", guest("2024-03-01T14:00", "2024-03-03T12:00"))
        .await;
    let id = reservation["id"].as_i64().unwrap();

    let (status, cancelled) = desk
        .post(&format!("/api/reservations/{}/cancel", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["estado"], "cancelled");

    let (status, _) = desk
        .post("/api/reservations", guest("2024-03-02T14:00", "2024-03-04T12:00"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = desk
        .post(&format!("/api/reservations/{}/cancel", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_phone_is_400_and_nothing_is_sent() {
    let desk = FrontDesk::new().await;
    let mut body = guest("2024-03-01T14:00", "2024-03-03T12:00");
    body["telefono"] = json!("12");

    let (status, error) = desk.post("/api/reservations", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].as_str().unwrap().contains("telefono"));
    tokio::task::yield_now().await;
    assert!(desk.notifier.sent().await.is_empty());
}

#[tokio::test]
async fn unknown_room_is_404() {
    let desk = FrontDesk::new().await;

    let (status, body) = desk
        .get("/api/rooms/42/availability?check_in=2024-03-01T14:00&check_out=2024-03-02T12:00")
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room 42 not found");
}
