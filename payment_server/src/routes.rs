//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the database so that endpoint tests can run them against a scratch
//! database; the server registers them with the concrete [`cafe_payment_engine::SqliteDatabase`].
use std::str::FromStr;

use actix_web::{get, web, HttpResponse, Responder};
use cafe_payment_engine::{
    db_types::{NewOrder, OrderId, PaymentMethod},
    payment_objects::CallbackRequest,
    PaymentFlowApi,
    PaymentFlowError,
    PaymentGatewayDatabase,
};
use log::*;

use crate::{
    data_objects::{InitiatePaymentRequest, NewOrderRequest, PaymentProjection, PaymentQuery},
    errors::ServerError,
};

#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

/// Route handler for `POST /orders`. Registers an order with the payment subsystem. Idempotent:
/// re-posting an order that already exists returns the stored record with a 200 rather than a 201.
pub async fn create_order<B: PaymentGatewayDatabase>(
    api: web::Data<PaymentFlowApi<B>>,
    body: web::Json<NewOrderRequest>,
) -> Result<HttpResponse, ServerError> {
    let order = NewOrder::from(body.into_inner());
    debug!("💻️ POST order {}", order.order_id);
    let (order, inserted) = api.process_new_order(order).await?;
    let response = if inserted { HttpResponse::Created().json(order) } else { HttpResponse::Ok().json(order) };
    Ok(response)
}

/// Route handler for `POST /payments`. Initiates a payment for an order with the requested method and
/// returns the payment record, including the QR payload for bank transfers.
pub async fn initiate_payment<B: PaymentGatewayDatabase>(
    api: web::Data<PaymentFlowApi<B>>,
    body: web::Json<InitiatePaymentRequest>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST payment for order {} via {}", request.order_slug, request.payment_method);
    let method = PaymentMethod::from_str(&request.payment_method)
        .map_err(|_| PaymentFlowError::InvalidPaymentMethod(request.payment_method.clone()))?;
    let order_id = OrderId(request.order_slug);
    let payment = api.initiate(&order_id, method).await?;
    Ok(HttpResponse::Created().json(PaymentProjection::from(payment)))
}

/// Route handler for `GET /payments?transaction=<id>`.
pub async fn payment_status<B: PaymentGatewayDatabase>(
    api: web::Data<PaymentFlowApi<B>>,
    query: web::Query<PaymentQuery>,
) -> Result<HttpResponse, ServerError> {
    let payment = api.payment_by_transaction_id(query.transaction.as_deref()).await?;
    Ok(HttpResponse::Ok().json(PaymentProjection::from(payment)))
}

/// Route handler for `POST /callback/acb`. The gateway posts settlement outcomes here; the response
/// body is the protocol-fixed acknowledgement and must be returned whenever the settlement step is
/// reached, including on replays.
pub async fn acb_callback<B: PaymentGatewayDatabase>(
    api: web::Data<PaymentFlowApi<B>>,
    body: web::Json<CallbackRequest>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST gateway callback");
    let ack = api.callback(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}
