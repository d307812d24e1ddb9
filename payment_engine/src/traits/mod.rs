//! Contracts that database backends must implement to support the payment engine.
//!
//! [`PaymentGatewayDatabase`] defines the storage behaviour the payment flow relies on: order intake,
//! atomic payment attachment, and the conditional settle update that makes callback handling idempotent.
mod payment_gateway_database;

pub use payment_gateway_database::{PaymentGatewayDatabase, PaymentGatewayError, SettlementOutcome};
