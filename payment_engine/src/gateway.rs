//! Collaborator seams for payment strategies.
//!
//! Strategies never talk to the outside world directly; they go through the object-safe traits defined
//! here. The server wires concrete implementations in (the ACB connector for [`BankGateway`], the
//! database-backed ledger for [`InternalLedger`]); tests substitute stubs or mocks.
use async_trait::async_trait;
use cpg_common::Money;
use thiserror::Error;

use crate::db_types::OrderId;

/// A request to the bank gateway for a payment QR code, keyed by a freshly generated transaction id.
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub transaction_id: String,
    pub order_id: OrderId,
    pub amount: Money,
    pub description: String,
}

/// The QR payload issued by the gateway, returned to the client verbatim for rendering.
#[derive(Debug, Clone)]
pub struct QrCode {
    pub payload: String,
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("The payment gateway could not be reached. {0}")]
    Unavailable(String),
    #[error("The payment gateway rejected the request. {0}")]
    Rejected(String),
}

/// Client for the external bank-transfer gateway.
#[async_trait]
pub trait BankGateway: Send + Sync {
    /// Request a QR code for the given transaction. The gateway will later report the outcome of the
    /// transfer via its callback, quoting `transaction_id` as the trace number.
    async fn create_qr(&self, request: QrRequest) -> Result<QrCode, GatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("The internal ledger is unavailable. {0}")]
    Unavailable(String),
}

/// The internal prepaid-balance ledger that the `internal` payment method settles against.
///
/// The ledger is read-only at this seam. The strategy uses the balance to decide the payment's initial
/// state; the actual debit is applied by the database backend in the same transaction that persists the
/// payment, so a failed initiation never strands a charge.
#[async_trait]
pub trait InternalLedger: Send + Sync {
    /// The customer's currently available balance. A customer without a ledger entry has a zero
    /// balance.
    async fn available_balance(&self, customer_id: &str) -> Result<Money, LedgerError>;
}
