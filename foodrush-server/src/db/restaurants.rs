use shared::models::{Restaurant, RestaurantUpdate};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: i64,
    name: String,
    address: String,
    cuisine_type: Option<String>,
    coordinates: Option<serde_json::Value>,
    created_at: i64,
}

impl RestaurantRow {
    fn into_model(self) -> Result<Restaurant, sqlx::Error> {
        let coordinates = self
            .coordinates
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(Restaurant {
            id: self.id,
            name: self.name,
            address: self.address,
            cuisine_type: self.cuisine_type,
            coordinates,
            created_at: self.created_at,
        })
    }
}

fn coordinates_json(coordinates: Option<[f64; 2]>) -> Option<serde_json::Value> {
    coordinates.map(|c| serde_json::json!(c))
}

pub async fn list(pool: &PgPool) -> Result<Vec<Restaurant>, sqlx::Error> {
    let rows: Vec<RestaurantRow> = sqlx::query_as("SELECT * FROM restaurants ORDER BY id")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(RestaurantRow::into_model).collect()
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Restaurant>, sqlx::Error> {
    let row: Option<RestaurantRow> = sqlx::query_as("SELECT * FROM restaurants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(RestaurantRow::into_model).transpose()
}

/// Name + address pairs are unique
pub async fn exists_by_name_address(
    pool: &PgPool,
    name: &str,
    address: &str,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM restaurants WHERE name = $1 AND address = $2")
            .bind(name)
            .bind(address)
            .fetch_optional(pool)
            .await?;
    Ok(row.is_some())
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    address: &str,
    cuisine_type: Option<&str>,
    coordinates: Option<[f64; 2]>,
    now: i64,
) -> Result<Restaurant, sqlx::Error> {
    let row: RestaurantRow = sqlx::query_as(
        "INSERT INTO restaurants (name, address, cuisine_type, coordinates, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *",
    )
    .bind(name)
    .bind(address)
    .bind(cuisine_type)
    .bind(coordinates_json(coordinates))
    .bind(now)
    .fetch_one(pool)
    .await?;
    row.into_model()
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    update: &RestaurantUpdate,
) -> Result<Option<Restaurant>, sqlx::Error> {
    let row: Option<RestaurantRow> = sqlx::query_as(
        "UPDATE restaurants
         SET name = COALESCE($1, name),
             address = COALESCE($2, address),
             cuisine_type = COALESCE($3, cuisine_type),
             coordinates = COALESCE($4, coordinates)
         WHERE id = $5
         RETURNING *",
    )
    .bind(update.name.as_deref())
    .bind(update.address.as_deref())
    .bind(update.cuisine_type.as_deref())
    .bind(coordinates_json(update.coordinates))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(RestaurantRow::into_model).transpose()
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
