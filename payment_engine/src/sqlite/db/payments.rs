use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, Payment, PaymentStatus},
    traits::PaymentGatewayError,
};

pub async fn insert(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, PaymentGatewayError> {
    let txid = payment.transaction_id.clone();
    let payment = sqlx::query_as(
        r#"
            INSERT INTO payments (payment_id, transaction_id, order_id, amount, method, status, status_message, qr_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *;
        "#,
    )
    .bind(payment.payment_id)
    .bind(payment.transaction_id)
    .bind(payment.order_id)
    .bind(payment.amount)
    .bind(payment.method)
    .bind(payment.status)
    .bind(payment.status_message)
    .bind(payment.qr_code)
    .fetch_one(conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(err) if err.is_unique_violation() => PaymentGatewayError::PaymentAlreadyExists(txid),
        _ => PaymentGatewayError::from(e),
    })?;
    Ok(payment)
}

pub async fn fetch_by_transaction_id(
    transaction_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE transaction_id = $1")
        .bind(transaction_id)
        .fetch_optional(conn)
        .await?;
    Ok(payment)
}

/// The pending → terminal compare-and-swap. The WHERE clause only matches a `Pending` payment, so a
/// payment that is already terminal is left exactly as it is and `None` is returned.
pub async fn settle(
    transaction_id: &str,
    status: PaymentStatus,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, sqlx::Error> {
    let payment = sqlx::query_as(
        r#"
            UPDATE payments
            SET status = $1, status_message = $2, updated_at = CURRENT_TIMESTAMP
            WHERE transaction_id = $3 AND status = 'Pending'
            RETURNING *;
        "#,
    )
    .bind(status)
    .bind(status.to_string())
    .bind(transaction_id)
    .fetch_optional(conn)
    .await?;
    Ok(payment)
}
