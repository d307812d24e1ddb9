use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, PaymentPaidEvent};

/// The producer handles that the payment flow API publishes events through. Built from
/// [`EventHandlers::producers`] and injected into the API explicitly, so every subscription is visible
/// at the wiring site.
#[derive(Default, Clone)]
pub struct EventProducers {
    pub payment_paid_producer: Vec<EventProducer<PaymentPaidEvent>>,
}

pub struct EventHandlers {
    pub on_payment_paid: Option<EventHandler<PaymentPaidEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_payment_paid = hooks.on_payment_paid.map(|f| EventHandler::new(buffer_size, f));
        Self { on_payment_paid }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_payment_paid {
            result.payment_paid_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_payment_paid {
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_payment_paid: Option<Handler<PaymentPaidEvent>>,
}

impl EventHooks {
    pub fn on_payment_paid<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(PaymentPaidEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_payment_paid = Some(Arc::new(f));
        self
    }
}
