use nailbook_api::routes::health::{HealthResponse, VersionResponse};
use nailbook_core::models::settings::WorkingHours;
use nailbook_db::mock::MockBookingStore;
use pretty_assertions::assert_eq;

use crate::test_utils::server;

#[tokio::test]
async fn health_reports_store_status() {
    let mut store = MockBookingStore::new();
    store
        .expect_working_hours()
        .returning(|| Ok(WorkingHours::default()));

    let response = server(store).get("/health").await;

    response.assert_status_ok();
    let body = response.json::<HealthResponse>();
    assert_eq!(body.status, "ok");
    assert_eq!(body.store, "ok");
}

#[tokio::test]
async fn version_names_the_package() {
    let response = server(MockBookingStore::new()).get("/version").await;

    response.assert_status_ok();
    assert_eq!(response.json::<VersionResponse>().name, "nailbook-api");
}
