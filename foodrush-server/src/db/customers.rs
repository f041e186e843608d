use shared::models::{Customer, CustomerUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    addresses: serde_json::Value,
    created_at: i64,
}

impl CustomerRow {
    fn into_model(self) -> Result<Customer, sqlx::Error> {
        let addresses =
            serde_json::from_value(self.addresses).map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(Customer {
            id: self.id,
            name: self.name,
            addresses,
            created_at: self.created_at,
        })
    }
}

pub async fn list(pool: &PgPool) -> Result<Vec<Customer>, sqlx::Error> {
    let rows: Vec<CustomerRow> = sqlx::query_as("SELECT * FROM customers ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(CustomerRow::into_model).collect()
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Customer>, sqlx::Error> {
    let row: Option<CustomerRow> = sqlx::query_as("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(CustomerRow::into_model).transpose()
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    addresses: &[String],
    now: i64,
) -> Result<Customer, sqlx::Error> {
    let row: CustomerRow = sqlx::query_as(
        "INSERT INTO customers (name, addresses, created_at)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(name)
    .bind(serde_json::json!(addresses))
    .bind(now)
    .fetch_one(pool)
    .await?;
    row.into_model()
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    update: &CustomerUpdate,
) -> Result<Option<Customer>, sqlx::Error> {
    let row: Option<CustomerRow> = sqlx::query_as(
        "UPDATE customers
         SET name = COALESCE($1, name),
             addresses = COALESCE($2, addresses)
         WHERE id = $3
         RETURNING *",
    )
    .bind(update.name.as_deref())
    .bind(update.addresses.as_ref().map(|a| serde_json::json!(a)))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(CustomerRow::into_model).transpose()
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
