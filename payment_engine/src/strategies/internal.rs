use std::sync::Arc;

use async_trait::async_trait;
use log::*;

use crate::{
    db_types::{NewPayment, Order, PaymentMethod, PaymentStatus},
    gateway::InternalLedger,
    helpers::new_transaction_id,
    strategies::{PaymentStrategy, StrategyError},
};

/// Settles against the customer's prepaid balance. A sufficient balance yields a payment born
/// `Completed`; an insufficient balance yields a `Failed` payment, which is a real settlement attempt
/// with a terminal outcome rather than an error. Only an unreachable ledger is an error, in which case
/// nothing is persisted.
///
/// The strategy only decides the outcome. The debit itself is applied by the backend in the same
/// transaction that persists and attaches the payment, so an initiation that fails after this point
/// never leaves the customer charged.
#[derive(Clone)]
pub struct InternalStrategy {
    ledger: Arc<dyn InternalLedger>,
}

impl InternalStrategy {
    pub fn new(ledger: Arc<dyn InternalLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl PaymentStrategy for InternalStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Internal
    }

    async fn process(&self, order: &Order) -> Result<NewPayment, StrategyError> {
        let transaction_id = new_transaction_id();
        let balance = self.ledger.available_balance(&order.customer_id).await?;
        if balance >= order.total_price {
            debug!(
                "💳️ Customer {} has {balance} available. Settling order {} internally",
                order.customer_id, order.order_id
            );
            Ok(NewPayment::new(order, PaymentMethod::Internal, transaction_id)
                .with_status(PaymentStatus::Completed, "Settled against internal balance"))
        } else {
            let message = format!(
                "Customer {} has insufficient balance: {balance} available, {} required",
                order.customer_id, order.total_price
            );
            info!("💳️ Internal payment for order {} declined: {message}", order.order_id);
            Ok(NewPayment::new(order, PaymentMethod::Internal, transaction_id)
                .with_status(PaymentStatus::Failed, message))
        }
    }
}
