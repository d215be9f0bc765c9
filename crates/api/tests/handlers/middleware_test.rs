use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use chrono::{NaiveDate, NaiveTime};
use nailbook_api::middleware::{auth, error_handling::map_error};
use nailbook_core::errors::{BookingError, SlotError};
use nailbook_db::mock::MockBookingStore;
use rstest::rstest;

use crate::test_utils::{admin_token_hash, server, server_with, ADMIN_TOKEN};

#[rstest]
#[case(BookingError::NotFound("booking".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("bad input".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Slot(SlotError::InvalidDuration(0)), StatusCode::BAD_REQUEST)]
#[case(
    BookingError::SlotUnavailable {
        date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    },
    StatusCode::CONFLICT
)]
#[case(BookingError::Authentication("no token".into()), StatusCode::UNAUTHORIZED)]
#[case(BookingError::Authorization("disabled".into()), StatusCode::FORBIDDEN)]
#[case(BookingError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn maps_errors_to_status(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[test_log::test]
fn token_hash_verifies_only_the_original_token() {
    let hash = admin_token_hash();

    assert!(auth::verify_token(ADMIN_TOKEN, &hash).unwrap());
    assert!(!auth::verify_token("guess", &hash).unwrap());
    assert!(auth::verify_token(ADMIN_TOKEN, "not-a-phc-string").is_err());
}

#[test_log::test(tokio::test)]
async fn wrong_token_is_unauthorized() {
    let mut store = MockBookingStore::new();
    store.expect_all_bookings().never();

    let response = server(store)
        .get("/api/bookings")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer guess"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_log::test(tokio::test)]
async fn admin_routes_are_forbidden_without_configured_hash() {
    let mut store = MockBookingStore::new();
    store.expect_all_bookings().never();

    let response = server_with(store, None)
        .get("/api/bookings")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer anything"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
