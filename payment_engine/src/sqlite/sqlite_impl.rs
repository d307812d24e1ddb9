use std::fmt::Debug;

use async_trait::async_trait;
use cpg_common::Money;
use log::*;
use sqlx::SqlitePool;

use super::db::{balances, new_pool, orders, payments};
use crate::{
    db_types::{NewOrder, NewPayment, Order, OrderId, Payment, PaymentMethod, PaymentStatus},
    gateway::{InternalLedger, LedgerError},
    traits::{PaymentGatewayDatabase, PaymentGatewayError, SettlementOutcome},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, PaymentGatewayError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Tops up a customer's prepaid balance. Used by staff tooling and tests; not part of the payment
    /// flow itself.
    pub async fn credit_customer(&self, customer_id: &str, amount: Money) -> Result<Money, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let balance = balances::credit(customer_id, amount, &mut conn).await?;
        debug!("🗃️ Credited {amount} to customer {customer_id}. New balance: {balance}");
        Ok(balance)
    }

    pub async fn customer_balance(&self, customer_id: &str) -> Result<Option<Money>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        Ok(balances::balance_of(customer_id, &mut conn).await?)
    }
}

impl PaymentGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_order(&self, order: NewOrder) -> Result<(Order, bool), PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let (order, inserted) = orders::idempotent_insert(order, &mut tx).await?;
        tx.commit().await?;
        Ok((order, inserted))
    }

    async fn fetch_order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_by_id(order_id, &mut conn).await?)
    }

    async fn attach_payment_to_order(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError> {
        let order_id = payment.order_id.clone();
        let mut tx = self.pool.begin().await?;
        let Some(order) = orders::fetch_order_by_id(&order_id, &mut tx).await? else {
            return Err(PaymentGatewayError::OrderNotFound(order_id));
        };
        let payment = payments::insert(payment, &mut tx).await?;
        if payment.method == PaymentMethod::Internal && payment.status == PaymentStatus::Completed {
            // The debit must commit or roll back together with the payment row. If the attach below
            // fails, dropping the transaction also undoes the debit.
            let debited = balances::debit(&order.customer_id, payment.amount, &mut tx).await?;
            if !debited {
                let balance =
                    balances::balance_of(&order.customer_id, &mut tx).await?.unwrap_or_default();
                return Err(PaymentGatewayError::InsufficientBalance {
                    customer_id: order.customer_id,
                    balance,
                    required: payment.amount,
                });
            }
        }
        let attached = orders::attach_payment(&order_id, &payment.payment_id, &mut tx).await?;
        if attached.is_none() {
            // The slot holds a Completed payment; dropping the transaction rolls everything back.
            return Err(PaymentGatewayError::OrderAlreadyPaid(order_id));
        }
        tx.commit().await?;
        debug!("🗃️ Payment [{}] attached to order {}", payment.transaction_id, payment.order_id);
        Ok(payment)
    }

    async fn fetch_payment_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        Ok(payments::fetch_by_transaction_id(transaction_id, &mut conn).await?)
    }

    async fn settle_payment(&self, transaction_id: &str, status: PaymentStatus) -> Result<SettlementOutcome, PaymentGatewayError> {
        if !status.is_terminal() {
            return Err(PaymentGatewayError::PaymentStatusUpdateError(format!(
                "Cannot settle payment [{transaction_id}] to non-terminal status {status}"
            )));
        }
        let mut conn = self.pool.acquire().await?;
        match payments::settle(transaction_id, status, &mut conn).await? {
            Some(payment) => {
                debug!("🗃️ Payment [{transaction_id}] transitioned to {status}");
                Ok(SettlementOutcome::Updated(payment))
            },
            None => match payments::fetch_by_transaction_id(transaction_id, &mut conn).await? {
                Some(payment) => Ok(SettlementOutcome::AlreadyTerminal(payment)),
                None => Err(PaymentGatewayError::PaymentNotFound(transaction_id.to_string())),
            },
        }
    }

    async fn mark_order_paid(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::mark_paid_if_pending(order_id, &mut conn).await?)
    }

    async fn close(&mut self) -> Result<(), PaymentGatewayError> {
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl InternalLedger for SqliteDatabase {
    async fn available_balance(&self, customer_id: &str) -> Result<Money, LedgerError> {
        let mut conn =
            self.pool.acquire().await.map_err(|e| LedgerError::Unavailable(e.to_string()))?;
        let balance = balances::balance_of(customer_id, &mut conn)
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?
            .unwrap_or_default();
        Ok(balance)
    }
}
