use axum::http::{header::AUTHORIZATION, StatusCode};
use nailbook_core::models::settings::{WorkingHours, WorkingHoursResponse};
use nailbook_db::mock::MockBookingStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{bearer, server, t};

#[tokio::test]
async fn reads_working_hours() {
    let mut store = MockBookingStore::new();
    store
        .expect_working_hours()
        .returning(|| Ok(WorkingHours::default()));

    let response = server(store).get("/api/settings/work-hours").await;

    response.assert_status_ok();
    let body = response.json::<WorkingHoursResponse>();
    assert_eq!(body.start, "10:00");
    assert_eq!(body.end, "21:00");
}

#[tokio::test]
async fn admin_updates_working_hours() {
    let expected = WorkingHours::new(t(9, 0), t(18, 30)).unwrap();

    let mut store = MockBookingStore::new();
    store
        .expect_set_working_hours()
        .withf(move |hours| *hours == expected)
        .times(1)
        .returning(|_| Ok(()));

    let response = server(store)
        .put("/api/settings/work-hours")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "start": "9:00", "end": "18:30" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<WorkingHoursResponse>().start, "09:00");
}

#[tokio::test]
async fn inverted_working_hours_are_rejected() {
    let mut store = MockBookingStore::new();
    store.expect_set_working_hours().never();

    let response = server(store)
        .put("/api/settings/work-hours")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "start": "18:00", "end": "09:00" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn updating_working_hours_needs_admin() {
    let mut store = MockBookingStore::new();
    store.expect_set_working_hours().never();

    let response = server(store)
        .put("/api/settings/work-hours")
        .json(&json!({ "start": "09:00", "end": "18:00" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
