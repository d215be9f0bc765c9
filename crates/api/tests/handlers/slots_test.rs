use axum::http::StatusCode;
use nailbook_api::handlers::slots::SlotsResponse;
use nailbook_core::models::{booking::BusyInterval, settings::WorkingHours};
use nailbook_db::mock::MockBookingStore;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use crate::test_utils::{server, service, t, tomorrow};

fn store_for_day(busy: Vec<BusyInterval>) -> MockBookingStore {
    let mut store = MockBookingStore::new();
    store
        .expect_working_hours()
        .returning(|| Ok(WorkingHours::new(t(10, 0), t(13, 0)).unwrap()));
    store
        .expect_busy_intervals()
        .returning(move |_| Ok(busy.clone()));
    store
}

#[tokio::test]
async fn slots_for_service_skip_existing_booking() {
    let manicure = service("Manicure", 60);
    let id = manicure.id;

    let mut store = store_for_day(vec![BusyInterval::new(t(10, 0), 60)]);
    store
        .expect_get_service()
        .withf(move |requested| *requested == id)
        .returning(move |_| Ok(Some(manicure.clone())));

    let response = server(store)
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .add_query_param("service_id", id)
        .await;

    response.assert_status_ok();
    let body = response.json::<SlotsResponse>();
    assert_eq!(body.duration_minutes, 60);
    assert_eq!(body.working_hours.start, "10:00");
    assert_eq!(body.slots, vec!["11:00", "11:30", "12:00"]);
}

#[tokio::test]
async fn explicit_duration_needs_no_service() {
    let mut store = store_for_day(Vec::new());
    store.expect_get_service().never();

    let response = server(store)
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .add_query_param("duration", 180)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<SlotsResponse>().slots, vec!["10:00"]);
}

#[tokio::test]
async fn service_longer_than_the_day_has_no_slots() {
    let store = store_for_day(Vec::new());

    let response = server(store)
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .add_query_param("duration", 240)
        .await;

    response.assert_status_ok();
    assert!(response.json::<SlotsResponse>().slots.is_empty());
}

#[tokio::test]
async fn zero_duration_is_a_bad_request() {
    let store = store_for_day(Vec::new());

    let response = server(store)
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .add_query_param("duration", 0)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_duration_and_service_is_a_bad_request() {
    let response = server(MockBookingStore::new())
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let mut store = MockBookingStore::new();
    store.expect_get_service().returning(|_| Ok(None));

    let response = server(store)
        .get("/api/slots")
        .add_query_param("date", tomorrow())
        .add_query_param("service_id", Uuid::new_v4())
        .await;

    response.assert_status_not_found();
}
