//! Client for the ACB bank-transfer gateway.
//!
//! Covers the two calls the payment server needs: fetching an OAuth access token and initiating a
//! QR-code payment. The gateway reports settlement outcomes asynchronously via a callback to the
//! server; that half of the protocol lives in the payment engine.
mod api;
mod config;
mod data_objects;
mod error;

pub use api::AcbApi;
pub use config::AcbConfig;
pub use data_objects::{AccessTokenResponse, QrCodeData, QrInitRequest, QrInitResponse, QrRequestParams};
pub use error::AcbApiError;
