use log::*;

use crate::{events::PaymentPaidEvent, traits::PaymentGatewayDatabase};

/// Subscribes to [`PaymentPaidEvent`] and flips the order from `Pending` to `Paid`.
///
/// The transition is a conditional update, so a duplicate event (or a payment completing for an order
/// that staff already handled) leaves the order untouched.
#[derive(Clone)]
pub struct OrderStatusProjector<B> {
    db: B,
}

impl<B> OrderStatusProjector<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderStatusProjector<B>
where B: PaymentGatewayDatabase
{
    pub async fn on_payment_paid(&self, event: PaymentPaidEvent) {
        match self.db.mark_order_paid(&event.order_id).await {
            Ok(Some(order)) => {
                info!("📦️✅️ Order {} marked as {} after payment [{}]", order.order_id, order.status, event.payment.transaction_id);
            },
            Ok(None) => {
                debug!("📦️✅️ Order {} was not pending; leaving its status untouched", event.order_id);
            },
            Err(e) => {
                error!("📦️✅️ Could not update status for order {}: {e}", event.order_id);
            },
        }
    }
}
