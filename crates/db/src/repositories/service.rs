use crate::models::DbService;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    name: &str,
    price: &str,
    duration_minutes: i32,
) -> Result<DbService> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating service: id={}, name={}, price={}, duration={}min",
        id, name, price, duration_minutes
    );

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, name, price, duration_minutes, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, price, duration_minutes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(price)
    .bind(duration_minutes)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn list_services(pool: &Pool<Postgres>) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, created_at
        FROM services
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(services)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, name, price, duration_minutes, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}
