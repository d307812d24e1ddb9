use std::fmt::Display;

use cafe_payment_engine::db_types::{NewOrder, OrderId, Payment, PaymentStatus};
use cpg_common::Money;
use serde::{Deserialize, Serialize};

/// Body of `POST /orders`: an order handed over by the ordering subsystem for payment tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    pub order_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub memo: Option<String>,
    pub total_price: i64,
}

impl From<NewOrderRequest> for NewOrder {
    fn from(request: NewOrderRequest) -> Self {
        let mut order =
            NewOrder::new(OrderId(request.order_id), request.customer_id, Money::from(request.total_price));
        order.memo = request.memo;
        order
    }
}

/// The view of a payment returned by the payment endpoints. Row ids and timestamps stay internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProjection {
    pub payment_id: String,
    pub transaction_id: String,
    pub order_id: OrderId,
    pub amount: Money,
    /// Wire spelling of the payment method, e.g. `bank-transfer`.
    pub method: String,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl From<Payment> for PaymentProjection {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.payment_id,
            transaction_id: payment.transaction_id,
            order_id: payment.order_id,
            amount: payment.amount,
            method: payment.method.to_string(),
            status: payment.status,
            status_message: payment.status_message,
            qr_code: payment.qr_code,
        }
    }
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub order_slug: String,
    pub payment_method: String,
}

/// Query string of `GET /payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentQuery {
    #[serde(default)]
    pub transaction: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn initiate_request_uses_camel_case() {
        let body = r#"{"orderSlug": "ORD1", "paymentMethod": "bank-transfer"}"#;
        let request: InitiatePaymentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.order_slug, "ORD1");
        assert_eq!(request.payment_method, "bank-transfer");
    }

    #[test]
    fn order_request_converts_to_new_order() {
        let body = r#"{"orderId": "ORD2", "customerId": "alice", "totalPrice": 45000}"#;
        let request: NewOrderRequest = serde_json::from_str(body).unwrap();
        let order = NewOrder::from(request);
        assert_eq!(order.order_id.as_str(), "ORD2");
        assert_eq!(order.total_price, Money::from(45_000));
        assert!(order.memo.is_none());
    }

    #[test]
    fn projection_hides_internal_fields_and_uses_wire_method_names() {
        let body = serde_json::json!({
            "paymentId": "p1",
            "transactionId": "t1",
            "orderId": "ORD3",
            "amount": 60_000,
            "method": "bank-transfer",
            "status": "Pending",
            "qrCode": "qr"
        });
        let projection: PaymentProjection = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&projection).unwrap(), body);
    }
}
