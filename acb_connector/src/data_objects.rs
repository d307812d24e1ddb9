//! Wire objects for the ACB gateway API. Field names and nesting follow the gateway's protocol.
use chrono::{SecondsFormat, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrInitRequest {
    pub request_trace: String,
    pub request_date_time: String,
    pub request_parameters: QrRequestParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRequestParams {
    /// The transaction id the engine assigned; the gateway echoes it back as the callback's trace
    /// number.
    pub trace_number: String,
    pub amount: i64,
    pub beneficiary_account: String,
    pub beneficiary_name: String,
    pub order_reference: String,
    pub description: String,
}

impl QrInitRequest {
    pub fn new(params: QrRequestParams) -> Self {
        Self {
            request_trace: rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect(),
            request_date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            request_parameters: params,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrInitResponse {
    pub request_trace: String,
    pub response_body: Option<QrCodeData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeData {
    /// EMVCo QR string for the client to render.
    pub qr_data_url: String,
    pub virtual_account: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn qr_request_serializes_to_protocol_field_names() {
        let request = QrInitRequest::new(QrRequestParams {
            trace_number: "tx-123".to_string(),
            amount: 45_000,
            beneficiary_account: "1234567890".to_string(),
            beneficiary_name: "CAFE".to_string(),
            order_reference: "ORD1".to_string(),
            description: "Order ORD1".to_string(),
        });
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["requestParameters"]["traceNumber"], "tx-123");
        assert_eq!(json["requestParameters"]["beneficiaryAccount"], "1234567890");
        assert_eq!(request.request_trace.len(), 32);
    }

    #[test]
    fn qr_response_deserializes() {
        let body = r#"{
            "requestTrace": "abc",
            "responseBody": { "qrDataUrl": "00020101021238...", "virtualAccount": "ACB001" }
        }"#;
        let response: QrInitResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.response_body.unwrap().qr_data_url, "00020101021238...");
    }
}
