use axum::http::{header::AUTHORIZATION, StatusCode};
use fake::{faker::lorem::en::Word, Fake};
use mockall::predicate;
use nailbook_core::models::service::{CreateServiceRequest, Service};
use nailbook_db::mock::MockBookingStore;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::test_utils::{bearer, server, service};

#[tokio::test]
async fn lists_catalog() {
    let catalog = vec![service("Manicure", 60), service("Pedicure", 90)];
    let expected = catalog.clone();

    let mut store = MockBookingStore::new();
    store
        .expect_list_services()
        .times(1)
        .returning(move || Ok(catalog.clone()));

    let response = server(store).get("/api/services").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Service>>(), expected);
}

#[tokio::test]
async fn create_requires_admin_token() {
    let mut store = MockBookingStore::new();
    store.expect_create_service().never();

    let response = server(store)
        .post("/api/services")
        .json(&json!({ "name": "Gel polish", "price": "2000", "duration_minutes": 90 }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_rejects_non_positive_duration() {
    let mut store = MockBookingStore::new();
    store.expect_create_service().never();

    let response = server(store)
        .post("/api/services")
        .add_header(AUTHORIZATION, bearer())
        .json(&json!({ "name": "Gel polish", "price": "2000", "duration_minutes": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_creates_service() {
    let name: String = Word().fake();
    let request = CreateServiceRequest {
        name: name.clone(),
        price: "2000".to_string(),
        duration_minutes: 90,
    };

    let mut store = MockBookingStore::new();
    store
        .expect_create_service()
        .with(predicate::eq(request.clone()))
        .times(1)
        .returning(|req| Ok(service(&req.name, req.duration_minutes)));

    let response = server(store)
        .post("/api/services")
        .add_header(AUTHORIZATION, bearer())
        .json(&request)
        .await;

    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Service>();
    assert_eq!(created.name, name);
    assert_eq!(created.duration_minutes, 90);
}
