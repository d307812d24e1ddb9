use async_trait::async_trait;
use log::*;

use crate::{
    db_types::{NewPayment, Order, PaymentMethod, PaymentStatus},
    helpers::new_transaction_id,
    strategies::{PaymentStrategy, StrategyError},
};

/// Cash settles synchronously at the point of sale, so the payment is born in the `Completed` state.
/// The transaction id is generated locally; no gateway is involved.
#[derive(Debug, Clone, Default)]
pub struct CashStrategy;

impl CashStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentStrategy for CashStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Cash
    }

    async fn process(&self, order: &Order) -> Result<NewPayment, StrategyError> {
        let payment = NewPayment::new(order, PaymentMethod::Cash, new_transaction_id())
            .with_status(PaymentStatus::Completed, "Settled in cash at point of sale");
        debug!("💵️ Cash payment [{}] for order {} settled immediately", payment.transaction_id, order.order_id);
        Ok(payment)
    }
}
