use std::sync::{Arc, OnceLock};

use axum::http::HeaderValue;
use axum_test::TestServer;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use fake::{faker::name::en::FirstName, Fake};
use nailbook_api::{build_router, middleware::auth, ApiState};
use nailbook_core::{
    models::{
        booking::{Booking, BookingStatus},
        service::Service,
    },
    time::salon_today,
};
use nailbook_db::mock::MockBookingStore;
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "salon-admin-token";

/// Argon2 is slow in debug builds, so the hash is computed once per test binary.
pub fn admin_token_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| auth::hash_token(ADMIN_TOKEN).unwrap())
        .clone()
}

pub fn bearer() -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {ADMIN_TOKEN}")).unwrap()
}

pub fn server(store: MockBookingStore) -> TestServer {
    server_with(store, Some(admin_token_hash()))
}

pub fn server_with(store: MockBookingStore, admin_token_hash: Option<String>) -> TestServer {
    let state = Arc::new(ApiState {
        store: Arc::new(store),
        admin_token_hash,
        slot_step_minutes: 30,
    });
    TestServer::new(build_router(state)).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn today() -> NaiveDate {
    salon_today()
}

pub fn tomorrow() -> NaiveDate {
    today() + Duration::days(1)
}

pub fn service(name: &str, duration_minutes: i64) -> Service {
    Service {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: "1500".to_string(),
        duration_minutes,
        created_at: Utc::now(),
    }
}

pub fn booking(service: &Service, date: NaiveDate, start: NaiveTime) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        user_id: 42,
        username: FirstName().fake(),
        service_id: Some(service.id),
        service_name: service.name.clone(),
        date,
        start_time: start,
        duration_minutes: service.duration_minutes,
        status: BookingStatus::Active,
        created_at: Utc::now(),
    }
}
