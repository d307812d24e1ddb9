use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::AcbConfig,
    data_objects::{AccessTokenResponse, QrInitRequest, QrInitResponse, QrRequestParams},
    AcbApiError,
    QrCodeData,
};

#[derive(Clone)]
pub struct AcbApi {
    config: AcbConfig,
    client: Arc<Client>,
}

impl AcbApi {
    pub fn new(config: AcbConfig) -> Result<Self, AcbApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.client_id.reveal().as_str())
            .map_err(|e| AcbApiError::Initialization(e.to_string()))?;
        headers.insert("X-Client-Id", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AcbApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<B>,
    ) -> Result<T, AcbApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| AcbApiError::ResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| AcbApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| AcbApiError::ResponseError(e.to_string()))?;
            Err(AcbApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Fetch a client-credentials access token for the QR initiation call.
    pub async fn access_token(&self) -> Result<AccessTokenResponse, AcbApiError> {
        debug!("Requesting ACB access token");
        let body = serde_json::json!({
            "client_id": self.config.client_id.reveal(),
            "client_secret": self.config.client_secret.reveal(),
            "grant_type": "client_credentials",
        });
        let token =
            self.rest_query::<AccessTokenResponse, _>(Method::POST, "/oauth/token", None, Some(body)).await?;
        debug!("Obtained ACB access token, expires in {}s", token.expires_in);
        Ok(token)
    }

    /// Initiate a QR payment for the given transaction. The gateway later reports the transfer's
    /// outcome via its callback, quoting the trace number.
    pub async fn initiate_qr(
        &self,
        trace_number: &str,
        amount: i64,
        order_reference: &str,
        description: &str,
    ) -> Result<QrCodeData, AcbApiError> {
        let token = self.access_token().await?;
        let request = QrInitRequest::new(QrRequestParams {
            trace_number: trace_number.to_string(),
            amount,
            beneficiary_account: self.config.merchant_account.clone(),
            beneficiary_name: self.config.merchant_name.clone(),
            order_reference: order_reference.to_string(),
            description: description.to_string(),
        });
        debug!("Initiating QR payment for transaction [{trace_number}], amount {amount}");
        let response = self
            .rest_query::<QrInitResponse, _>(
                Method::POST,
                "/payments/qr-payment/v1/init",
                Some(&token.access_token),
                Some(&request),
            )
            .await?;
        let qr = response.response_body.ok_or(AcbApiError::MissingQrPayload)?;
        info!("QR payment initiated for transaction [{trace_number}]");
        Ok(qr)
    }
}
