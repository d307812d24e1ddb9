use std::sync::Arc;

use actix_web::{test, test::TestRequest, web, App};
use cafe_payment_engine::{
    gateway::{BankGateway, GatewayError, QrCode},
    strategies::{BankTransferStrategy, CashStrategy, InternalStrategy, StrategySelector},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    PaymentFlowApi,
    PaymentGatewayDatabase,
    SqliteDatabase,
};
use serde_json::{json, Value};
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::{
    routes::{acb_callback, create_order, initiate_payment, payment_status},
    test::mocks::MockGateway,
};

async fn new_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

async fn tear_down(mut db: SqliteDatabase) {
    let url = db.url().to_string();
    db.close().await.expect("Error closing database");
    Sqlite::drop_database(&url).await.expect("Error dropping database");
}

fn selector(db: &SqliteDatabase, gateway: Arc<dyn BankGateway>) -> StrategySelector {
    StrategySelector::new()
        .with_strategy(Arc::new(CashStrategy::new()))
        .with_strategy(Arc::new(BankTransferStrategy::new(gateway)))
        .with_strategy(Arc::new(InternalStrategy::new(Arc::new(db.clone()))))
}

fn routes_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/orders").route(web::post().to(create_order::<SqliteDatabase>)))
        .service(
            web::resource("/payments")
                .route(web::post().to(initiate_payment::<SqliteDatabase>))
                .route(web::get().to(payment_status::<SqliteDatabase>)),
        )
        .service(web::resource("/callback/acb").route(web::post().to(acb_callback::<SqliteDatabase>)));
}

fn order_body(slug: &str) -> Value {
    json!({ "orderId": slug, "customerId": "alice", "totalPrice": 45_000 })
}

fn callback_body(trace: &str, status: &str) -> Value {
    json!({
        "requestParameters": {
            "request": {
                "requestParams": {
                    "transactions": [{
                        "transactionEntityAttribute": { "traceNumber": trace },
                        "transactionStatus": status
                    }]
                }
            }
        }
    })
}

#[actix_web::test]
async fn order_intake_is_idempotent() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD1")).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 201);

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD1")).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 200);
    tear_down(db).await;
}

#[actix_web::test]
async fn cash_payment_settles_synchronously() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD2")).to_request();
    test::call_service(&app, req).await;

    let body = json!({ "orderSlug": "ORD2", "paymentMethod": "cash" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let payment: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(payment["status"], "Completed");
    assert_eq!(payment["method"], "cash");
    assert!(payment["qrCode"].is_null());
    tear_down(db).await;
}

#[actix_web::test]
async fn bank_transfer_returns_the_gateway_qr() {
    let db = new_db().await;
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_qr()
        .times(1)
        .returning(|_| Ok(QrCode { payload: "00020101021238-test-payload".to_string() }));
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(gateway)), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD3")).to_request();
    test::call_service(&app, req).await;

    let body = json!({ "orderSlug": "ORD3", "paymentMethod": "bank-transfer" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let payment: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(payment["status"], "Pending");
    assert_eq!(payment["method"], "bank-transfer");
    assert_eq!(payment["qrCode"], "00020101021238-test-payload");
    tear_down(db).await;
}

#[actix_web::test]
async fn unknown_order_is_a_404_with_code_1001() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let body = json!({ "orderSlug": "NOPE", "paymentMethod": "cash" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], 1001);
    tear_down(db).await;
}

#[actix_web::test]
async fn unknown_method_is_a_400_with_code_1003() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD4")).to_request();
    test::call_service(&app, req).await;

    let body = json!({ "orderSlug": "ORD4", "paymentMethod": "credit-card" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], 1003);
    tear_down(db).await;
}

#[actix_web::test]
async fn gateway_outage_is_a_502_with_code_1007() {
    let db = new_db().await;
    let mut gateway = MockGateway::new();
    gateway
        .expect_create_qr()
        .returning(|_| Err(GatewayError::Unavailable("connection refused".to_string())));
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(gateway)), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD5")).to_request();
    test::call_service(&app, req).await;

    let body = json!({ "orderSlug": "ORD5", "paymentMethod": "bank-transfer" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 502);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], 1007);
    // Nothing was persisted for the failed attempt.
    let req = TestRequest::get().uri("/payments?transaction=anything").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    tear_down(db).await;
}

#[actix_web::test]
async fn callback_settles_the_payment_and_acks() {
    let db = new_db().await;
    let mut gateway = MockGateway::new();
    gateway.expect_create_qr().returning(|_| Ok(QrCode { payload: "qr".to_string() }));
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(gateway)), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::post().uri("/orders").set_json(order_body("ORD6")).to_request();
    test::call_service(&app, req).await;
    let body = json!({ "orderSlug": "ORD6", "paymentMethod": "bank-transfer" });
    let req = TestRequest::post().uri("/payments").set_json(body).to_request();
    let payment: Value = test::call_and_read_body_json(&app, req).await;
    let transaction_id = payment["transactionId"].as_str().unwrap().to_string();

    let req = TestRequest::post()
        .uri("/callback/acb")
        .set_json(callback_body(&transaction_id, "COMPLETED"))
        .to_request();
    let ack: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ack["responseStatus"]["responseCode"], "SUCCESS");
    assert_eq!(ack["responseStatus"]["responseMessage"], "COMPLETED");
    assert_eq!(ack["responseBody"]["index"], 1);
    assert_eq!(ack["responseBody"]["referenceCode"], payment["paymentId"]);

    let req = TestRequest::get().uri(&format!("/payments?transaction={transaction_id}")).to_request();
    let payment: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(payment["status"], "Completed");
    tear_down(db).await;
}

#[actix_web::test]
async fn callback_for_unknown_transaction_is_a_404_with_code_1005() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req =
        TestRequest::post().uri("/callback/acb").set_json(callback_body("no-such-trace", "COMPLETED")).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], 1005);
    tear_down(db).await;
}

#[actix_web::test]
async fn empty_payment_query_is_a_400_with_code_1006() {
    let db = new_db().await;
    let api = PaymentFlowApi::new(db.clone(), selector(&db, Arc::new(MockGateway::new())), Default::default());
    let app = test::init_service(App::new().app_data(web::Data::new(api)).configure(routes_config)).await;

    let req = TestRequest::get().uri("/payments").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], 1006);
    tear_down(db).await;
}
