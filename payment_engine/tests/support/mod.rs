pub mod prepare_env;

use std::sync::{atomic::AtomicI32, Arc};

use async_trait::async_trait;
use cafe_payment_engine::{
    gateway::{BankGateway, GatewayError, QrCode, QrRequest},
    strategies::{BankTransferStrategy, CashStrategy, InternalStrategy, StrategySelector},
    SqliteDatabase,
};

/// Gateway stand-in that issues a deterministic QR payload for the requested transaction.
pub struct StubGateway;

#[async_trait]
impl BankGateway for StubGateway {
    async fn create_qr(&self, request: QrRequest) -> Result<QrCode, GatewayError> {
        Ok(QrCode { payload: format!("QR:{}", request.transaction_id) })
    }
}

/// Gateway stand-in that is always down.
pub struct DownGateway;

#[async_trait]
impl BankGateway for DownGateway {
    async fn create_qr(&self, _request: QrRequest) -> Result<QrCode, GatewayError> {
        Err(GatewayError::Unavailable("connection refused".to_string()))
    }
}

pub fn full_selector(db: &SqliteDatabase) -> StrategySelector {
    StrategySelector::new()
        .with_strategy(Arc::new(CashStrategy::new()))
        .with_strategy(Arc::new(BankTransferStrategy::new(Arc::new(StubGateway))))
        .with_strategy(Arc::new(InternalStrategy::new(Arc::new(db.clone()))))
}

#[derive(Default, Clone)]
pub struct HookCalled {
    called: Arc<AtomicI32>,
}

impl HookCalled {
    pub fn called(&self) {
        let _ = self.called.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    }

    pub fn count(&self) -> i32 {
        self.called.load(std::sync::atomic::Ordering::Relaxed)
    }
}
