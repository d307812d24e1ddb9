use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use cafe_payment_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    strategies::{BankTransferStrategy, CashStrategy, InternalStrategy, StrategySelector},
    OrderStatusProjector,
    PaymentFlowApi,
    SqliteDatabase,
};
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::acb::AcbGateway,
    routes::{acb_callback, create_order, health, initiate_payment, payment_status},
};

const EVENT_BUFFER_SIZE: usize = 128;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let producers = start_event_handlers(db.clone());
    let selector = build_selector(&config, &db)?;
    let srv = create_server_instance(config, db, selector, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Wires the order status projector into the payment-paid hook and starts the handler loop. The
/// returned producers are handed to every [`PaymentFlowApi`] instance.
pub fn start_event_handlers(db: SqliteDatabase) -> EventProducers {
    let projector = OrderStatusProjector::new(db);
    let mut hooks = EventHooks::default();
    hooks.on_payment_paid(move |event| {
        let projector = projector.clone();
        Box::pin(async move {
            projector.on_payment_paid(event).await;
        })
    });
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, hooks);
    let producers = handlers.producers();
    tokio::spawn(async move {
        handlers.start_handlers().await;
    });
    producers
}

pub fn build_selector(config: &ServerConfig, db: &SqliteDatabase) -> Result<StrategySelector, ServerError> {
    let gateway =
        AcbGateway::new(config.acb_config.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let selector = StrategySelector::new()
        .with_strategy(Arc::new(CashStrategy::new()))
        .with_strategy(Arc::new(BankTransferStrategy::new(Arc::new(gateway))))
        .with_strategy(Arc::new(InternalStrategy::new(Arc::new(db.clone()))));
    info!("🚀️ Payment methods enabled: {:?}", selector.supported_methods());
    Ok(selector)
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    selector: StrategySelector,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let payments_api = PaymentFlowApi::new(db.clone(), selector.clone(), producers.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("cps::access_log"))
            .app_data(web::Data::new(payments_api))
            .service(health)
            .service(web::resource("/orders").route(web::post().to(create_order::<SqliteDatabase>)))
            .service(
                web::resource("/payments")
                    .route(web::post().to(initiate_payment::<SqliteDatabase>))
                    .route(web::get().to(payment_status::<SqliteDatabase>)),
            )
            .service(web::resource("/callback/acb").route(web::post().to(acb_callback::<SqliteDatabase>)))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
