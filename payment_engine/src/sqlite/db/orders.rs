use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderId},
    traits::PaymentGatewayError,
};

/// Inserts the order into the database, returning `false` in the second tuple element if the order
/// already exists.
pub async fn idempotent_insert(
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<(Order, bool), PaymentGatewayError> {
    let inserted = match fetch_order_by_id(&order.order_id, conn).await? {
        Some(order) => (order, false),
        None => {
            let order = insert_order(order, conn).await?;
            debug!("📝️ Order {} inserted with id {}", order.order_id, order.id);
            (order, true)
        },
    };
    Ok(inserted)
}

async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, PaymentGatewayError> {
    let order = sqlx::query_as(
        r#"
            INSERT INTO orders (order_id, customer_id, memo, total_price, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(order.order_id)
    .bind(order.customer_id)
    .bind(order.memo)
    .bind(order.total_price)
    .bind(order.created_at)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn fetch_order_by_id(order_id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order =
        sqlx::query_as("SELECT * FROM orders WHERE order_id = $1").bind(order_id.as_str()).fetch_optional(conn).await?;
    Ok(order)
}

/// Points the order's payment slot at the given payment slug.
///
/// The update is conditional: it refuses to displace a payment that has already Completed, which is
/// what keeps two racing initiations from both winning the slot. Returns the updated order, or `None`
/// if the condition did not hold (missing order, or a Completed payment already attached).
pub async fn attach_payment(
    order_id: &OrderId,
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET payment_id = $1, updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $2
              AND NOT EXISTS (
                SELECT 1 FROM payments p
                WHERE p.payment_id = orders.payment_id AND p.status = 'Completed'
              )
            RETURNING *;
        "#,
    )
    .bind(payment_id)
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

/// Flips the order to `Paid`, conditional on it currently being `Pending`. Returns `None` when the
/// order was not pending (or does not exist); callers treat that as a no-op.
pub async fn mark_paid_if_pending(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as(
        r#"
            UPDATE orders
            SET status = 'Paid', updated_at = CURRENT_TIMESTAMP
            WHERE order_id = $1 AND status = 'Pending'
            RETURNING *;
        "#,
    )
    .bind(order_id.as_str())
    .fetch_optional(conn)
    .await?;
    Ok(order)
}
