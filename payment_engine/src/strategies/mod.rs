//! Payment strategies.
//!
//! Each supported payment method maps to a strategy with one job: turn an order into a [`NewPayment`]
//! in its correct initial state. The [`StrategySelector`] holds a method → strategy table; the flow API
//! looks the strategy up and never knows which concrete implementation it is talking to.
//!
//! A strategy failure (gateway unreachable, ledger down) must leave no partial state behind; strategies
//! therefore only *build* the payment record, and the flow API persists it afterwards.
mod bank_transfer;
mod cash;
mod internal;

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;

pub use bank_transfer::BankTransferStrategy;
pub use cash::CashStrategy;
pub use internal::InternalStrategy;

use crate::{
    db_types::{NewPayment, Order, PaymentMethod},
    gateway::{GatewayError, LedgerError},
};

#[derive(Debug, Clone, Error)]
pub enum StrategyError {
    #[error("{0}")]
    Gateway(#[from] GatewayError),
    #[error("{0}")]
    Ledger(#[from] LedgerError),
}

#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// The payment method this strategy settles.
    fn method(&self) -> PaymentMethod;

    /// Produce a payment record for the order, in the state appropriate for this method. No persistence
    /// happens here.
    async fn process(&self, order: &Order) -> Result<NewPayment, StrategyError>;
}

/// Method → strategy table. Built once at startup from whatever strategies the deployment supports.
#[derive(Clone, Default)]
pub struct StrategySelector {
    strategies: HashMap<PaymentMethod, Arc<dyn PaymentStrategy>>,
}

impl StrategySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, strategy: Arc<dyn PaymentStrategy>) {
        self.strategies.insert(strategy.method(), strategy);
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn PaymentStrategy>) -> Self {
        self.register(strategy);
        self
    }

    /// Look up the strategy for the requested method. `None` means the method is not supported by this
    /// deployment; the flow API surfaces that as `InvalidPaymentMethod`.
    pub fn select(&self, method: PaymentMethod) -> Option<&Arc<dyn PaymentStrategy>> {
        self.strategies.get(&method)
    }

    pub fn supported_methods(&self) -> Vec<PaymentMethod> {
        self.strategies.keys().copied().collect()
    }
}
