//! Adapts the ACB connector to the engine's [`BankGateway`] seam.
use acb_connector::{AcbApi, AcbApiError, AcbConfig};
use async_trait::async_trait;
use cafe_payment_engine::gateway::{BankGateway, GatewayError, QrCode, QrRequest};
use log::*;

#[derive(Clone)]
pub struct AcbGateway {
    api: AcbApi,
}

impl AcbGateway {
    pub fn new(config: AcbConfig) -> Result<Self, AcbApiError> {
        let api = AcbApi::new(config)?;
        Ok(Self { api })
    }
}

#[async_trait]
impl BankGateway for AcbGateway {
    async fn create_qr(&self, request: QrRequest) -> Result<QrCode, GatewayError> {
        let qr = self
            .api
            .initiate_qr(
                &request.transaction_id,
                request.amount.value(),
                request.order_id.as_str(),
                &request.description,
            )
            .await
            .map_err(|e| match e {
                AcbApiError::QueryError { status, message } => {
                    warn!("🏦️ ACB rejected QR initiation with status {status}: {message}");
                    GatewayError::Rejected(format!("Status {status}: {message}"))
                },
                e => GatewayError::Unavailable(e.to_string()),
            })?;
        Ok(QrCode { payload: qr.qr_data_url })
    }
}
