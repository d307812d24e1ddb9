use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use cafe_payment_engine::PaymentFlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error(transparent)]
    PaymentError(#[from] PaymentFlowError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentError(e) => match e {
                PaymentFlowError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                PaymentFlowError::PaymentNotFound(_) => StatusCode::NOT_FOUND,
                PaymentFlowError::OrderAlreadyPaid(_) => StatusCode::BAD_REQUEST,
                PaymentFlowError::InvalidPaymentMethod(_) => StatusCode::BAD_REQUEST,
                PaymentFlowError::TransactionNotFound => StatusCode::BAD_REQUEST,
                PaymentFlowError::QueryInvalid => StatusCode::BAD_REQUEST,
                PaymentFlowError::InsufficientBalance(_) => StatusCode::BAD_REQUEST,
                PaymentFlowError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
                PaymentFlowError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            Self::PaymentError(e) => e.code(),
            _ => 1500,
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "code": code, "error": self.to_string() }).to_string())
    }
}
