use std::sync::Arc;

use async_trait::async_trait;
use log::*;

use crate::{
    db_types::{NewPayment, Order, PaymentMethod},
    gateway::{BankGateway, QrRequest},
    helpers::new_transaction_id,
    strategies::{PaymentStrategy, StrategyError},
};

/// Bank transfers settle asynchronously. The strategy asks the gateway for a QR code keyed by a freshly
/// generated transaction id and returns a `Pending` payment carrying the QR payload. The gateway later
/// reports the outcome through its callback, quoting the same transaction id as the trace number.
///
/// If the gateway call fails, the error propagates and no payment is created; the client may resubmit.
#[derive(Clone)]
pub struct BankTransferStrategy {
    gateway: Arc<dyn BankGateway>,
}

impl BankTransferStrategy {
    pub fn new(gateway: Arc<dyn BankGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl PaymentStrategy for BankTransferStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::BankTransfer
    }

    async fn process(&self, order: &Order) -> Result<NewPayment, StrategyError> {
        let transaction_id = new_transaction_id();
        let request = QrRequest {
            transaction_id: transaction_id.clone(),
            order_id: order.order_id.clone(),
            amount: order.total_price,
            description: format!("Order {}", order.order_id),
        };
        let qr = self.gateway.create_qr(request).await?;
        debug!("🏦️ Gateway issued QR for transaction [{transaction_id}] on order {}", order.order_id);
        let payment =
            NewPayment::new(order, PaymentMethod::BankTransfer, transaction_id).with_qr_code(qr.payload);
        Ok(payment)
    }
}
