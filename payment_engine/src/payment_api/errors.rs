use thiserror::Error;

use crate::{
    db_types::OrderId,
    gateway::{GatewayError, LedgerError},
    strategies::StrategyError,
    traits::PaymentGatewayError,
};

/// Failures of the payment flow, each with a stable numeric code for the API surface.
#[derive(Debug, Clone, Error)]
pub enum PaymentFlowError {
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("Order {0} has already been paid")]
    OrderAlreadyPaid(OrderId),
    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),
    #[error("Transaction not found in callback payload")]
    TransactionNotFound,
    #[error("Payment not found for transaction id {0}")]
    PaymentNotFound(String),
    #[error("Payment query is invalid")]
    QueryInvalid,
    #[error("Payment gateway unavailable. {0}")]
    GatewayUnavailable(String),
    #[error("Insufficient balance. {0}")]
    InsufficientBalance(String),
    #[error("Internal error. {0}")]
    Internal(String),
}

impl PaymentFlowError {
    /// Stable numeric identifier for this failure, exposed alongside the message on the API surface.
    pub fn code(&self) -> u16 {
        match self {
            PaymentFlowError::OrderNotFound(_) => 1001,
            PaymentFlowError::OrderAlreadyPaid(_) => 1002,
            PaymentFlowError::InvalidPaymentMethod(_) => 1003,
            PaymentFlowError::TransactionNotFound => 1004,
            PaymentFlowError::PaymentNotFound(_) => 1005,
            PaymentFlowError::QueryInvalid => 1006,
            PaymentFlowError::GatewayUnavailable(_) => 1007,
            PaymentFlowError::InsufficientBalance(_) => 1008,
            PaymentFlowError::Internal(_) => 1500,
        }
    }
}

impl From<PaymentGatewayError> for PaymentFlowError {
    fn from(e: PaymentGatewayError) -> Self {
        match e {
            PaymentGatewayError::OrderNotFound(id) => PaymentFlowError::OrderNotFound(id),
            PaymentGatewayError::OrderAlreadyPaid(id) => PaymentFlowError::OrderAlreadyPaid(id),
            PaymentGatewayError::PaymentNotFound(txid) => PaymentFlowError::PaymentNotFound(txid),
            e @ PaymentGatewayError::InsufficientBalance { .. } => {
                PaymentFlowError::InsufficientBalance(e.to_string())
            },
            PaymentGatewayError::DatabaseError(m)
            | PaymentGatewayError::PaymentAlreadyExists(m)
            | PaymentGatewayError::PaymentStatusUpdateError(m) => PaymentFlowError::Internal(m),
        }
    }
}

impl From<StrategyError> for PaymentFlowError {
    fn from(e: StrategyError) -> Self {
        match e {
            StrategyError::Gateway(GatewayError::Unavailable(m)) => PaymentFlowError::GatewayUnavailable(m),
            StrategyError::Gateway(GatewayError::Rejected(m)) => PaymentFlowError::GatewayUnavailable(m),
            StrategyError::Ledger(LedgerError::Unavailable(m)) => PaymentFlowError::GatewayUnavailable(m),
        }
    }
}
