//! The public payment API.
//!
//! [`payment_flow_api::PaymentFlowApi`] coordinates the whole reconciliation flow: order lookup,
//! strategy selection, atomic persistence, callback interpretation, and event emission.
//! [`payment_objects`] holds the gateway wire contract; its shapes are fixed by the ACB protocol and
//! must not drift.
pub mod errors;
pub mod order_projector;
pub mod payment_flow_api;
pub mod payment_objects;
