use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use cpg_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(pub String);

//--------------------------------------        OrderId        -------------------------------------------------------
/// The public slug identifying an order. Assigned by the ordering subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------   OrderStatusType     -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order has been created and is awaiting payment.
    Pending,
    /// A payment covering the order has settled.
    Paid,
    /// The order has been fulfilled and handed over.
    Completed,
    /// Payment for the order failed.
    Failed,
    /// The order has been cancelled by the customer or staff.
    Cancelled,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "Pending"),
            OrderStatusType::Paid => write!(f, "Paid"),
            OrderStatusType::Completed => write!(f, "Completed"),
            OrderStatusType::Failed => write!(f, "Failed"),
            OrderStatusType::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl From<String> for OrderStatusType {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            log::error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatusType::Pending
        })
    }
}

//--------------------------------------    PaymentMethod      -------------------------------------------------------
/// How the customer wants to settle the order. The wire spellings (`cash`, `bank-transfer`, `internal`) are
/// what clients send in the initiation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    Internal,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::BankTransfer => write!(f, "bank-transfer"),
            PaymentMethod::Internal => write!(f, "internal"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "bank-transfer" => Ok(Self::BankTransfer),
            "internal" => Ok(Self::Internal),
            s => Err(ConversionError(format!("Invalid payment method: {s}"))),
        }
    }
}

//--------------------------------------    PaymentStatus      -------------------------------------------------------
/// The settlement state of a payment. `Pending` may transition to exactly one of the terminal states;
/// terminal states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Completed | PaymentStatus::Failed)
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Completed => write!(f, "Completed"),
            PaymentStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            "Failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

//--------------------------------------        Order        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_id: OrderId,
    pub customer_id: String,
    pub memo: Option<String>,
    pub total_price: Money,
    pub status: OrderStatusType,
    /// Slug of the payment currently attached to this order, if any. An order holds at most one active
    /// payment; attaching a new one replaces a prior unpaid reference.
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder       --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The order slug as assigned by the ordering subsystem
    pub order_id: OrderId,
    /// The customer placing the order
    pub customer_id: String,
    /// An optional note supplied with the order
    pub memo: Option<String>,
    /// The order subtotal
    pub total_price: Money,
    /// The time the order was created upstream
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(order_id: OrderId, customer_id: String, total_price: Money) -> Self {
        Self { order_id, customer_id, memo: None, total_price, created_at: Utc::now() }
    }

    pub fn is_equivalent(&self, order: &Order) -> bool {
        self.order_id == order.order_id
            && self.customer_id == order.customer_id
            && self.memo == order.memo
            && self.total_price == order.total_price
    }
}

//--------------------------------------        Payment       --------------------------------------------------------
/// A single settlement attempt against an order. Payments are never deleted; a superseded payment simply
/// loses the order's `payment_id` reference.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// The public slug identifying this payment
    pub payment_id: String,
    /// Opaque correlation key linking this payment to the gateway's transaction record. Unique and
    /// immutable once assigned.
    pub transaction_id: String,
    /// The slug of the order this payment belongs to
    pub order_id: OrderId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub status_message: Option<String>,
    /// QR payload for the client to render. Only present for bank-transfer payments.
    pub qr_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewPayment      --------------------------------------------------------
/// The output of a payment strategy, ready to be persisted and attached to its order in one transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPayment {
    pub payment_id: String,
    pub transaction_id: String,
    pub order_id: OrderId,
    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub status_message: Option<String>,
    pub qr_code: Option<String>,
}

impl NewPayment {
    pub fn new(order: &Order, method: PaymentMethod, transaction_id: String) -> Self {
        Self {
            payment_id: crate::helpers::new_payment_slug(),
            transaction_id,
            order_id: order.order_id.clone(),
            amount: order.total_price,
            method,
            status: PaymentStatus::Pending,
            status_message: None,
            qr_code: None,
        }
    }

    pub fn with_status(mut self, status: PaymentStatus, message: impl Into<String>) -> Self {
        self.status = status;
        self.status_message = Some(message.into());
        self
    }

    pub fn with_qr_code(mut self, qr_code: String) -> Self {
        self.qr_code = Some(qr_code);
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn payment_method_wire_spellings() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("bank-transfer".parse::<PaymentMethod>().unwrap(), PaymentMethod::BankTransfer);
        assert_eq!("internal".parse::<PaymentMethod>().unwrap(), PaymentMethod::Internal);
        assert!("credit-card".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::BankTransfer.to_string(), "bank-transfer");
    }

    #[test]
    fn terminal_statuses() {
        assert!(!PaymentStatus::Pending.is_terminal());
        assert!(PaymentStatus::Completed.is_terminal());
        assert!(PaymentStatus::Failed.is_terminal());
    }

    #[test]
    fn order_status_round_trip() {
        for status in
            [OrderStatusType::Pending, OrderStatusType::Paid, OrderStatusType::Completed, OrderStatusType::Failed, OrderStatusType::Cancelled]
        {
            assert_eq!(status.to_string().parse::<OrderStatusType>().unwrap(), status);
        }
        assert!("Unknown".parse::<OrderStatusType>().is_err());
    }
}
