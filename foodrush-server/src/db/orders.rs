//! Order store: list/create plus the guarded lifecycle mutations
//!
//! Every status mutation runs as `SELECT ... FOR UPDATE` + `UPDATE`
//! inside one transaction, so two concurrent transitions on the same
//! order serialize: the loser revalidates against the committed status
//! and fails with `InvalidTransition` instead of overwriting.

use shared::OrderStatus;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderCreate, OrderItem};
use sqlx::{PgConnection, PgPool};

use crate::error::ServiceResult;

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_id: i64,
    restaurant_id: i64,
    driver_id: Option<i64>,
    items: serde_json::Value,
    total_amount: f64,
    status: String,
    customer_name: Option<String>,
    restaurant_name: Option<String>,
    driver_name: Option<String>,
    delivery_address: Option<String>,
    delivery_coordinates: Option<serde_json::Value>,
    created_at: i64,
    confirmed_at: Option<i64>,
    in_transit_at: Option<i64>,
    delivered_at: Option<i64>,
    cancelled_at: Option<i64>,
}

impl OrderRow {
    fn status(&self) -> Result<OrderStatus, sqlx::Error> {
        OrderStatus::parse(&self.status).ok_or_else(|| {
            sqlx::Error::Decode(format!("unknown order status: {}", self.status).into())
        })
    }

    fn into_model(self) -> Result<Order, sqlx::Error> {
        let status = self.status()?;
        let items: Vec<OrderItem> =
            serde_json::from_value(self.items).map_err(|e| sqlx::Error::Decode(e.into()))?;
        let delivery_coordinates = self
            .delivery_coordinates
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(e.into()))?;
        Ok(Order {
            id: self.id,
            customer_id: self.customer_id,
            restaurant_id: self.restaurant_id,
            driver_id: self.driver_id,
            items,
            total_amount: self.total_amount,
            status,
            customer_name: self.customer_name,
            restaurant_name: self.restaurant_name,
            driver_name: self.driver_name,
            delivery_address: self.delivery_address,
            delivery_coordinates,
            created_at: self.created_at,
            confirmed_at: self.confirmed_at,
            in_transit_at: self.in_transit_at,
            delivered_at: self.delivered_at,
            cancelled_at: self.cancelled_at,
        })
    }
}

/// Filters for the order listing
#[derive(Debug, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Inclusive `created_at` lower bound (millis)
    pub from: Option<i64>,
    /// Inclusive `created_at` upper bound (millis)
    pub to: Option<i64>,
    /// Free-text match over id/customer/restaurant/driver/address
    pub q: Option<String>,
    /// `created_at` ascending instead of the default descending
    pub ascending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

pub async fn list(pool: &PgPool, filter: &OrderFilter) -> Result<Vec<Order>, sqlx::Error> {
    let direction = if filter.ascending { "ASC" } else { "DESC" };
    let sql = format!(
        "SELECT * FROM orders
         WHERE ($1::text IS NULL OR status = $1)
           AND ($2::bigint IS NULL OR created_at >= $2)
           AND ($3::bigint IS NULL OR created_at <= $3)
           AND ($4::text IS NULL
                OR CAST(id AS TEXT) ILIKE $4
                OR customer_name ILIKE $4
                OR restaurant_name ILIKE $4
                OR driver_name ILIKE $4
                OR delivery_address ILIKE $4)
         ORDER BY created_at {direction}
         LIMIT $5 OFFSET $6"
    );

    let rows: Vec<OrderRow> = sqlx::query_as(&sql)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.from)
        .bind(filter.to)
        .bind(filter.q.as_ref().map(|q| format!("%{q}%")))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(OrderRow::into_model).collect()
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Order>, sqlx::Error> {
    let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(OrderRow::into_model).transpose()
}

async fn lock_order(conn: &mut PgConnection, id: i64) -> ServiceResult<OrderRow> {
    let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    row.ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).into())
}

async fn driver_name_for(conn: &mut PgConnection, driver_id: i64) -> ServiceResult<String> {
    let row: Option<(String,)> = sqlx::query_as("SELECT name FROM drivers WHERE id = $1")
        .bind(driver_id)
        .fetch_optional(conn)
        .await?;
    Ok(row
        .ok_or_else(|| AppError::new(ErrorCode::DriverNotFound))?
        .0)
}

/// Insert a new order after verifying its references.
///
/// `total` is the server-side recomputed amount — the submitted value is
/// validated against it before this is called. When a driver is attached
/// at creation the row starts out `assigned` (a driver is never attached
/// to a `new` order) and the driver is marked busy.
pub async fn create(
    pool: &PgPool,
    req: &OrderCreate,
    total: f64,
    now: i64,
) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let customer: Option<(String,)> = sqlx::query_as("SELECT name FROM customers WHERE id = $1")
        .bind(req.customer_id)
        .fetch_optional(&mut *tx)
        .await?;
    let customer_name = customer
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?
        .0;

    let restaurant: Option<(String,)> =
        sqlx::query_as("SELECT name FROM restaurants WHERE id = $1")
            .bind(req.restaurant_id)
            .fetch_optional(&mut *tx)
            .await?;
    let restaurant_name = restaurant
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?
        .0;

    let (status, driver_name) = match req.driver_id {
        Some(driver_id) => {
            let name = driver_name_for(&mut *tx, driver_id).await?;
            (
                OrderStatus::Assigned,
                Some(req.driver_name.clone().unwrap_or(name)),
            )
        }
        None => (OrderStatus::New, None),
    };

    let row: OrderRow = sqlx::query_as(
        "INSERT INTO orders (customer_id, restaurant_id, driver_id, items, total_amount,
                             status, customer_name, restaurant_name, driver_name,
                             delivery_address, delivery_coordinates, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(req.customer_id)
    .bind(req.restaurant_id)
    .bind(req.driver_id)
    .bind(serde_json::json!(req.items))
    .bind(total)
    .bind(status.as_str())
    .bind(req.customer_name.as_deref().unwrap_or(&customer_name))
    .bind(req.restaurant_name.as_deref().unwrap_or(&restaurant_name))
    .bind(driver_name.as_deref())
    .bind(req.delivery_address.as_deref())
    .bind(req.delivery_coordinates.map(|c| serde_json::json!(c)))
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(driver_id) = req.driver_id {
        sqlx::query("UPDATE drivers SET status = 'busy' WHERE id = $1")
            .bind(driver_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(row.into_model()?)
}

/// Transition an order to `target`, stamping the matching timestamp.
///
/// Fails with `OrderNotFound` for a missing id and `InvalidTransition`
/// when `target` is not reachable from the committed status; the row is
/// left unchanged on failure. Cancellation detaches the driver id (a
/// cancelled order carries no driver) but keeps the name snapshot for
/// display.
pub async fn update_status(
    pool: &PgPool,
    id: i64,
    target: OrderStatus,
    now: i64,
) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let row = lock_order(&mut *tx, id).await?;
    let current = row.status()?;
    if !current.can_transition_to(target) {
        return Err(AppError::invalid_transition(current.as_str(), target.as_str()).into());
    }

    let updated: OrderRow = sqlx::query_as(
        "UPDATE orders
         SET status = $1,
             confirmed_at = CASE WHEN $1 = 'preparing' THEN $2 ELSE confirmed_at END,
             in_transit_at = CASE WHEN $1 = 'in-transit' THEN $2 ELSE in_transit_at END,
             delivered_at = CASE WHEN $1 = 'delivered' THEN $2 ELSE delivered_at END,
             cancelled_at = CASE WHEN $1 = 'cancelled' THEN $2 ELSE cancelled_at END,
             driver_id = CASE WHEN $1 = 'cancelled' THEN NULL ELSE driver_id END
         WHERE id = $3
         RETURNING *",
    )
    .bind(target.as_str())
    .bind(now)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated.into_model()?)
}

/// Attach a driver and force the order to `assigned`.
///
/// Only valid while the order is `new` or `assigned`; later statuses
/// fail with `InvalidTransition`. The driver is marked busy in the same
/// transaction.
pub async fn assign_driver(
    pool: &PgPool,
    id: i64,
    driver_id: i64,
    driver_name: &str,
) -> ServiceResult<Order> {
    let mut tx = pool.begin().await?;

    let row = lock_order(&mut *tx, id).await?;
    let current = row.status()?;
    if !current.allows_driver_assignment() {
        return Err(
            AppError::invalid_transition(current.as_str(), OrderStatus::Assigned.as_str()).into(),
        );
    }

    // Driver must exist even though the display name comes from the request
    driver_name_for(&mut *tx, driver_id).await?;

    let updated: OrderRow = sqlx::query_as(
        "UPDATE orders
         SET driver_id = $1, driver_name = $2, status = 'assigned'
         WHERE id = $3
         RETURNING *",
    )
    .bind(driver_id)
    .bind(driver_name)
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE drivers SET status = 'busy' WHERE id = $1")
        .bind(driver_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(updated.into_model()?)
}
