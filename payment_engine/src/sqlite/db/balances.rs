use cpg_common::Money;
use sqlx::SqliteConnection;

pub async fn balance_of(customer_id: &str, conn: &mut SqliteConnection) -> Result<Option<Money>, sqlx::Error> {
    let balance: Option<(Money,)> = sqlx::query_as("SELECT balance FROM balances WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_optional(conn)
        .await?;
    Ok(balance.map(|(b,)| b))
}

/// Adds `amount` to the customer's balance, creating the balance row if needed.
pub async fn credit(customer_id: &str, amount: Money, conn: &mut SqliteConnection) -> Result<Money, sqlx::Error> {
    let (balance,): (Money,) = sqlx::query_as(
        r#"
            INSERT INTO balances (customer_id, balance) VALUES ($1, $2)
            ON CONFLICT (customer_id)
            DO UPDATE SET balance = balance + excluded.balance, updated_at = CURRENT_TIMESTAMP
            RETURNING balance;
        "#,
    )
    .bind(customer_id)
    .bind(amount)
    .fetch_one(conn)
    .await?;
    Ok(balance)
}

/// Deducts `amount`, conditional on the balance covering it. Returns `true` if the debit happened.
pub async fn debit(customer_id: &str, amount: Money, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
            UPDATE balances
            SET balance = balance - $1, updated_at = CURRENT_TIMESTAMP
            WHERE customer_id = $2 AND balance >= $1
        "#,
    )
    .bind(amount)
    .bind(customer_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
