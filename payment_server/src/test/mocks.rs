use async_trait::async_trait;
use cafe_payment_engine::gateway::{BankGateway, GatewayError, QrCode, QrRequest};
use mockall::mock;

mock! {
    pub Gateway {}

    #[async_trait]
    impl BankGateway for Gateway {
        async fn create_qr(&self, request: QrRequest) -> Result<QrCode, GatewayError>;
    }
}
