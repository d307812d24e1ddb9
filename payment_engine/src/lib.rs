//! Café Payment Engine
//!
//! The payment engine holds the core logic for taking payments against café orders: strategy selection
//! (cash, bank transfer, internal balance), payment initiation, and reconciliation of the asynchronous
//! callbacks posted by the bank-transfer gateway. It is HTTP-framework agnostic.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`] and the contracts in [`mod@traits`]). You should never
//!    need to access the database directly; use the public API instead. The exception is the data types used
//!    in the database, which are defined in the [`mod@db_types`] module and are public.
//! 2. The public payment API ([`mod@payment_api`]). [`PaymentFlowApi`] owns the `initiate` and `callback`
//!    operations and emits a [`events::PaymentPaidEvent`] whenever a payment reaches the Completed state.
//! 3. The event plumbing ([`mod@events`]). A small channel-based hook system lets collaborators (most
//!    importantly the [`OrderStatusProjector`]) subscribe to payment events without any global wiring.
pub mod db_types;
pub mod events;
pub mod gateway;
pub mod helpers;
pub mod strategies;
pub mod traits;

mod payment_api;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use gateway::{BankGateway, GatewayError, InternalLedger, LedgerError};
pub use payment_api::{
    errors::PaymentFlowError,
    order_projector::OrderStatusProjector,
    payment_flow_api::PaymentFlowApi,
    payment_objects,
};
pub use traits::{PaymentGatewayDatabase, PaymentGatewayError, SettlementOutcome};
