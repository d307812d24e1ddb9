//! Wire objects for the ACB gateway callback contract.
//!
//! The request and acknowledgement shapes below, including their nesting and field names, are fixed by
//! the gateway's protocol. The acknowledgement must be emitted verbatim in this shape whenever the
//! callback reaches the settlement step, including on idempotent replays.
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{db_types::Payment, helpers::new_trace_id};

/// The transaction status value the gateway reports for a settled transfer. Anything else maps to a
/// failed payment.
pub const ACB_TRANSACTION_COMPLETED: &str = "COMPLETED";

//--------------------------------------  Callback request  ----------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackRequest {
    #[serde(default)]
    pub request_parameters: Option<RequestParameters>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    #[serde(default)]
    pub request: Option<CallbackInnerRequest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackInnerRequest {
    #[serde(default)]
    pub request_params: Option<RequestParams>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    #[serde(default)]
    pub transactions: Vec<CallbackTransaction>,
}

/// One settlement report. Arrives at least once per real-world settlement; the engine must treat
/// replays as no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackTransaction {
    pub transaction_entity_attribute: TransactionEntityAttribute,
    pub transaction_status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntityAttribute {
    /// Echo of the transaction id the engine generated at initiation.
    pub trace_number: String,
}

impl CallbackRequest {
    /// The gateway batches transactions, but each callback carries the outcome of one settlement; only
    /// the first entry is processed.
    pub fn first_transaction(&self) -> Option<&CallbackTransaction> {
        self.request_parameters
            .as_ref()?
            .request
            .as_ref()?
            .request_params
            .as_ref()?
            .transactions
            .first()
    }
}

impl CallbackTransaction {
    pub fn is_completed(&self) -> bool {
        self.transaction_status == ACB_TRANSACTION_COMPLETED
    }
}

//--------------------------------------  Callback ack  --------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcbResponseCode {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackAck {
    /// Freshly generated trace id for this acknowledgement.
    pub request_trace: String,
    pub response_date_time: String,
    pub response_status: AckStatus,
    pub response_body: AckBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckStatus {
    pub response_code: AcbResponseCode,
    /// Echo of the incoming transaction status.
    pub response_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AckBody {
    pub index: i32,
    /// The slug of the payment the settlement was matched to.
    pub reference_code: String,
}

impl CallbackAck {
    pub fn new(transaction: &CallbackTransaction, payment: &Payment) -> Self {
        let response_code =
            if transaction.is_completed() { AcbResponseCode::Success } else { AcbResponseCode::BadRequest };
        Self {
            request_trace: new_trace_id(),
            response_date_time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            response_status: AckStatus { response_code, response_message: transaction.transaction_status.clone() },
            response_body: AckBody { index: 1, reference_code: payment.payment_id.clone() },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_transaction_walks_the_nesting() {
        let body = serde_json::json!({
            "requestParameters": {
                "request": {
                    "requestParams": {
                        "transactions": [
                            {
                                "transactionEntityAttribute": { "traceNumber": "trace-1" },
                                "transactionStatus": "COMPLETED"
                            },
                            {
                                "transactionEntityAttribute": { "traceNumber": "trace-2" },
                                "transactionStatus": "REVERSED"
                            }
                        ]
                    }
                }
            }
        });
        let request: CallbackRequest = serde_json::from_value(body).unwrap();
        let tx = request.first_transaction().unwrap();
        assert_eq!(tx.transaction_entity_attribute.trace_number, "trace-1");
        assert!(tx.is_completed());
    }

    #[test]
    fn empty_payload_has_no_transaction() {
        let request: CallbackRequest = serde_json::from_str("{}").unwrap();
        assert!(request.first_transaction().is_none());

        let request: CallbackRequest =
            serde_json::from_str(r#"{"requestParameters": {"request": {"requestParams": {"transactions": []}}}}"#)
                .unwrap();
        assert!(request.first_transaction().is_none());
    }

    #[test]
    fn response_codes_serialize_to_protocol_values() {
        assert_eq!(serde_json::to_string(&AcbResponseCode::Success).unwrap(), r#""SUCCESS""#);
        assert_eq!(serde_json::to_string(&AcbResponseCode::BadRequest).unwrap(), r#""BAD_REQUEST""#);
    }
}
