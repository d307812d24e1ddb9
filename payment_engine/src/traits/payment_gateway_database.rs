use cpg_common::Money;
use thiserror::Error;

use crate::db_types::{NewOrder, NewPayment, Order, OrderId, Payment, PaymentStatus};

/// The result of a [`PaymentGatewayDatabase::settle_payment`] call.
#[derive(Debug, Clone)]
pub enum SettlementOutcome {
    /// The payment was Pending and has now transitioned to the requested terminal status.
    Updated(Payment),
    /// The payment was already in a terminal state. Nothing was written. The carried payment reflects
    /// the persisted state, which may differ from the requested status on a conflicting replay.
    AlreadyTerminal(Payment),
}

impl SettlementOutcome {
    pub fn payment(&self) -> &Payment {
        match self {
            SettlementOutcome::Updated(p) | SettlementOutcome::AlreadyTerminal(p) => p,
        }
    }
}

/// Storage contract for the payment engine.
///
/// Backends must guarantee two things beyond plain CRUD:
/// * [`Self::attach_payment_to_order`] persists the payment and repoints the order's payment slot in a
///   single atomic transaction, and refuses to displace a Completed payment. This serialises concurrent
///   initiations on the order's current-payment slot.
/// * [`Self::settle_payment`] applies the pending → terminal transition as a conditional update keyed on
///   the transaction id, so that at most one terminal transition ever happens, no matter how many times
///   the gateway replays a callback.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Takes a new order and stores it. This call is idempotent: if an order with the same slug already
    /// exists, the existing record is returned and the second tuple element is `false`.
    async fn insert_order(&self, order: NewOrder) -> Result<(Order, bool), PaymentGatewayError>;

    /// Fetches the order with the given slug.
    async fn fetch_order_by_id(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError>;

    /// In a single atomic transaction, persists the payment produced by a strategy and attaches it to
    /// its order, replacing any prior unpaid payment reference. An internal payment arriving in the
    /// `Completed` state debits the customer's balance in the same transaction, so a failure on any
    /// step leaves the balance untouched.
    ///
    /// Fails with [`PaymentGatewayError::OrderAlreadyPaid`] if the order already holds a Completed
    /// payment, with [`PaymentGatewayError::PaymentAlreadyExists`] on a transaction id collision, and
    /// with [`PaymentGatewayError::InsufficientBalance`] if the balance no longer covers an internal
    /// payment at persistence time.
    async fn attach_payment_to_order(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError>;

    /// Fetches the payment correlated with the given gateway transaction id.
    async fn fetch_payment_by_transaction_id(&self, transaction_id: &str) -> Result<Option<Payment>, PaymentGatewayError>;

    /// Applies the pending → terminal transition for the payment with the given transaction id.
    ///
    /// The update is conditional on the current status being `Pending`. If the payment is already
    /// terminal, nothing is written and [`SettlementOutcome::AlreadyTerminal`] is returned so that the
    /// caller can treat the replay as a no-op rather than an error.
    ///
    /// `status` must be terminal; passing `Pending` is a contract violation and returns
    /// [`PaymentGatewayError::PaymentStatusUpdateError`].
    async fn settle_payment(&self, transaction_id: &str, status: PaymentStatus) -> Result<SettlementOutcome, PaymentGatewayError>;

    /// Transitions the order to `Paid`, conditional on it currently being `Pending`. Returns the updated
    /// order, or `None` if the order was not in a state that allows the transition.
    async fn mark_order_paid(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), PaymentGatewayError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("We have an internal database engine error (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("Order {0} has already been paid")]
    OrderAlreadyPaid(OrderId),
    #[error("Cannot insert payment, since it already exists with transaction id {0}")]
    PaymentAlreadyExists(String),
    #[error("The requested payment does not exist for transaction id {0}")]
    PaymentNotFound(String),
    #[error("Illegal payment status change. {0}")]
    PaymentStatusUpdateError(String),
    #[error("Customer {customer_id} has insufficient balance: {balance} available, {required} required")]
    InsufficientBalance { customer_id: String, balance: Money, required: Money },
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}
