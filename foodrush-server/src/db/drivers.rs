use shared::models::{Driver, DriverStatus};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct DriverRow {
    id: i64,
    name: String,
    status: String,
    created_at: i64,
}

impl DriverRow {
    fn into_model(self) -> Result<Driver, sqlx::Error> {
        let status = DriverStatus::parse(&self.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown driver status: {}", self.status).into())
        })?;
        Ok(Driver {
            id: self.id,
            name: self.name,
            status,
            created_at: self.created_at,
        })
    }
}

pub async fn list(pool: &PgPool, status: Option<DriverStatus>) -> Result<Vec<Driver>, sqlx::Error> {
    let rows: Vec<DriverRow> = sqlx::query_as(
        "SELECT * FROM drivers
         WHERE ($1::text IS NULL OR status = $1)
         ORDER BY id",
    )
    .bind(status.map(|s| s.as_str()))
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(DriverRow::into_model).collect()
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Driver>, sqlx::Error> {
    let row: Option<DriverRow> = sqlx::query_as("SELECT * FROM drivers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(DriverRow::into_model).transpose()
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    status: DriverStatus,
    now: i64,
) -> Result<Driver, sqlx::Error> {
    let row: DriverRow = sqlx::query_as(
        "INSERT INTO drivers (name, status, created_at)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(name)
    .bind(status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;
    row.into_model()
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    name: Option<&str>,
    status: Option<DriverStatus>,
) -> Result<Option<Driver>, sqlx::Error> {
    let row: Option<DriverRow> = sqlx::query_as(
        "UPDATE drivers
         SET name = COALESCE($1, name), status = COALESCE($2, status)
         WHERE id = $3
         RETURNING *",
    )
    .bind(name)
    .bind(status.map(|s| s.as_str()))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(DriverRow::into_model).transpose()
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
