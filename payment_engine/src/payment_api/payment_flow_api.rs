use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Order, OrderId, OrderStatusType, Payment, PaymentMethod, PaymentStatus},
    events::{EventProducers, PaymentPaidEvent},
    payment_api::{
        errors::PaymentFlowError,
        payment_objects::{CallbackAck, CallbackRequest},
    },
    strategies::StrategySelector,
    traits::{PaymentGatewayDatabase, SettlementOutcome},
};

/// `PaymentFlowApi` is the primary API for taking payments against orders and reconciling the
/// asynchronous callbacks posted by the bank gateway.
pub struct PaymentFlowApi<B> {
    db: B,
    selector: StrategySelector,
    producers: EventProducers,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B> {
    pub fn new(db: B, selector: StrategySelector, producers: EventProducers) -> Self {
        Self { db, selector, producers }
    }
}

impl<B> PaymentFlowApi<B>
where B: PaymentGatewayDatabase
{
    /// Initiate a payment for the given order using the requested method.
    ///
    /// The order is loaded, the strategy for the method produces the payment record, and the record is
    /// persisted and attached to the order in a single transaction. No order status change happens
    /// here: if the strategy settled synchronously (cash, internal balance), the payment-paid hook is
    /// called and the order status projector picks the change up from there, exactly as it would for a
    /// gateway callback.
    pub async fn initiate(&self, order_id: &OrderId, method: PaymentMethod) -> Result<Payment, PaymentFlowError> {
        let order = self
            .db
            .fetch_order_by_id(order_id)
            .await?
            .ok_or_else(|| PaymentFlowError::OrderNotFound(order_id.clone()))?;
        if matches!(order.status, OrderStatusType::Paid | OrderStatusType::Completed) {
            return Err(PaymentFlowError::OrderAlreadyPaid(order_id.clone()));
        }
        let strategy = self
            .selector
            .select(method)
            .ok_or_else(|| PaymentFlowError::InvalidPaymentMethod(method.to_string()))?;
        let new_payment = strategy.process(&order).await?;
        let payment = self.db.attach_payment_to_order(new_payment).await?;
        debug!(
            "🔄️💰️ Payment [{}] ({}) initiated for order {} with status {}",
            payment.transaction_id, payment.method, order.order_id, payment.status
        );
        if payment.status == PaymentStatus::Completed {
            self.call_payment_paid_hook(&payment).await;
        }
        Ok(payment)
    }

    /// Reconcile a gateway callback against its pending payment.
    ///
    /// The settlement is applied as a conditional update keyed on the trace number, so a replayed
    /// callback for an already-terminal payment writes nothing and emits nothing. The acknowledgement
    /// is protocol-fixed: its response code is mapped from the *incoming* transaction status, on the
    /// replay path as much as on the first delivery.
    pub async fn callback(&self, request: CallbackRequest) -> Result<CallbackAck, PaymentFlowError> {
        let transaction = request.first_transaction().ok_or(PaymentFlowError::TransactionNotFound)?;
        let trace = transaction.transaction_entity_attribute.trace_number.as_str();
        let target =
            if transaction.is_completed() { PaymentStatus::Completed } else { PaymentStatus::Failed };
        trace!("🔄️🏦️ Callback received for transaction [{trace}], target status {target}");
        let outcome = self.db.settle_payment(trace, target).await?;
        match &outcome {
            SettlementOutcome::Updated(payment) => {
                debug!("🔄️🏦️ Payment [{trace}] settled as {}", payment.status);
                if payment.status == PaymentStatus::Completed {
                    self.call_payment_paid_hook(payment).await;
                }
            },
            SettlementOutcome::AlreadyTerminal(payment) if payment.status == target => {
                debug!("🔄️🏦️ Callback replay for [{trace}] ignored; payment already {}", payment.status);
            },
            SettlementOutcome::AlreadyTerminal(payment) => {
                warn!(
                    "🔄️🏦️ Conflicting callback for [{trace}]: payment is {} but gateway reported {}. \
                     Keeping the first terminal state.",
                    payment.status, transaction.transaction_status
                );
            },
        }
        Ok(CallbackAck::new(transaction, outcome.payment()))
    }

    /// Look up a payment by the `transaction` query parameter. An absent or empty parameter is a
    /// `QueryInvalid` failure.
    pub async fn payment_by_transaction_id(&self, transaction: Option<&str>) -> Result<Payment, PaymentFlowError> {
        let txid = transaction.map(str::trim).filter(|s| !s.is_empty()).ok_or(PaymentFlowError::QueryInvalid)?;
        self.db
            .fetch_payment_by_transaction_id(txid)
            .await?
            .ok_or_else(|| PaymentFlowError::PaymentNotFound(txid.to_string()))
    }

    /// Submit a new order. Idempotent; returns the order and whether it was newly inserted.
    pub async fn process_new_order(&self, order: crate::db_types::NewOrder) -> Result<(Order, bool), PaymentFlowError> {
        let (order, inserted) = self.db.insert_order(order).await?;
        debug!("🔄️📦️ Order {} {}", order.order_id, if inserted { "inserted" } else { "already existed" });
        Ok((order, inserted))
    }

    async fn call_payment_paid_hook(&self, payment: &Payment) {
        for producer in &self.producers.payment_paid_producer {
            debug!("🔄️💰️ Notifying payment-paid subscribers for order {}", payment.order_id);
            let event = PaymentPaidEvent::new(payment.clone());
            producer.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
