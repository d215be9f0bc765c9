use axum::http::{header::AUTHORIZATION, StatusCode};
use axum_test::TestResponse;
use chrono::{Duration, NaiveDate};
use nailbook_core::{
    errors::BookingError,
    models::booking::{Booking, BookingStatus},
};
use nailbook_db::mock::MockBookingStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{bearer, booking, server, service, t, today, tomorrow};

#[tokio::test]
async fn books_a_free_slot() {
    let manicure = service("Manicure", 60);
    let service_id = manicure.id;
    let date = tomorrow();

    let mut store = MockBookingStore::new();
    let found = manicure.clone();
    store
        .expect_get_service()
        .returning(move |_| Ok(Some(found.clone())));
    store
        .expect_create_booking()
        .withf(move |new| {
            new.service_id == service_id
                && new.start_time == t(11, 30)
                && new.duration_minutes == 60
                && new.service_name == "Manicure"
        })
        .times(1)
        .returning(move |new| {
            let mut created = booking(&manicure, new.date, new.start_time);
            created.user_id = new.user_id;
            Ok(created)
        });

    let response = server(store)
        .post("/api/bookings")
        .json(&json!({
            "user_id": 7,
            "username": "anna",
            "service_id": service_id,
            "date": date,
            "time": "11:30",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Booking>();
    assert_eq!(created.user_id, 7);
    assert_eq!(created.date, date);
    assert_eq!(created.status, BookingStatus::Active);
}

#[tokio::test]
async fn taken_slot_is_a_conflict() {
    let manicure = service("Manicure", 60);
    let service_id = manicure.id;

    let mut store = MockBookingStore::new();
    store
        .expect_get_service()
        .returning(move |_| Ok(Some(manicure.clone())));
    store.expect_create_booking().returning(|new| {
        Err(BookingError::SlotUnavailable {
            date: new.date,
            time: new.start_time,
        })
    });

    let response = server(store)
        .post("/api/bookings")
        .json(&json!({
            "user_id": 7,
            "username": "anna",
            "service_id": service_id,
            "date": tomorrow(),
            "time": "10:00",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn malformed_time_is_rejected_before_the_store() {
    let mut store = MockBookingStore::new();
    store.expect_create_booking().never();

    let response = server(store)
        .post("/api/bookings")
        .json(&json!({
            "user_id": 7,
            "username": "anna",
            "service_id": Uuid::new_v4(),
            "date": tomorrow(),
            "time": "25:00",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("Invalid time format"));
}

async fn post_for_date(date: NaiveDate) -> TestResponse {
    let mut store = MockBookingStore::new();
    store.expect_get_service().never();
    store.expect_create_booking().never();

    server(store)
        .post("/api/bookings")
        .json(&json!({
            "user_id": 7,
            "username": "anna",
            "service_id": Uuid::new_v4(),
            "date": date,
            "time": "10:00",
        }))
        .await
}

#[tokio::test]
async fn past_dates_are_rejected() {
    let response = post_for_date(today() - Duration::days(1)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn same_day_bookings_are_rejected() {
    let response = post_for_date(today()).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert!(body["error"].as_str().unwrap().contains("bookings open the day after"));
}

#[tokio::test]
async fn listing_all_bookings_needs_admin() {
    let manicure = service("Manicure", 60);
    let all = vec![booking(&manicure, tomorrow(), t(10, 0))];

    let mut store = MockBookingStore::new();
    store
        .expect_all_bookings()
        .times(1)
        .returning(move || Ok(all.clone()));
    let server = server(store);

    server
        .get("/api/bookings")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/bookings")
        .add_header(AUTHORIZATION, bearer())
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Booking>>().len(), 1);
}

#[tokio::test]
async fn admin_marks_booking_done() {
    let manicure = service("Manicure", 60);
    let existing = booking(&manicure, tomorrow(), t(10, 0));
    let id = existing.id;

    let mut store = MockBookingStore::new();
    store
        .expect_update_booking_status()
        .withf(move |booking_id, status| *booking_id == id && *status == BookingStatus::Done)
        .times(1)
        .returning(move |_, status| {
            let mut updated = existing.clone();
            updated.status = status;
            Ok(updated)
        });

    let response = server(store)
        .put(&format!("/api/bookings/{id}/status"))
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "status": "done" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Booking>().status, BookingStatus::Done);
}

#[tokio::test]
async fn deleting_unknown_booking_is_not_found() {
    let mut store = MockBookingStore::new();
    store
        .expect_delete_booking()
        .returning(|id| Err(BookingError::NotFound(format!("Booking {id} not found"))));

    let response = server(store)
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer())
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn admin_deletes_booking() {
    let mut store = MockBookingStore::new();
    store.expect_delete_booking().times(1).returning(|_| Ok(()));

    let response = server(store)
        .delete(&format!("/api/bookings/{}", Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer())
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}
