use serde::{Deserialize, Serialize};

use crate::db_types::{OrderId, Payment};

/// Emitted when a payment reaches the `Completed` state, whether synchronously (cash, internal balance)
/// or via a gateway callback. Consumed by the order status projector to flip the order to `Paid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPaidEvent {
    pub order_id: OrderId,
    pub payment: Payment,
}

impl PaymentPaidEvent {
    pub fn new(payment: Payment) -> Self {
        let order_id = payment.order_id.clone();
        Self { order_id, payment }
    }
}
