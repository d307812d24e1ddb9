//! `SqliteDatabase` is the concrete storage backend for the payment engine.
//!
//! It implements [`crate::traits::PaymentGatewayDatabase`] plus the [`crate::gateway::InternalLedger`]
//! seam (customer balances live in the same database as orders and payments, so internal settlement is
//! a single conditional UPDATE).
pub mod db;
mod sqlite_impl;

pub use sqlite_impl::SqliteDatabase;
