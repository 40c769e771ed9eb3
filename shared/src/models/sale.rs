//! Sale models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_buyer_phone, validate_cost, validate_price, validate_sale_date};

/// Date format used for sale dates in storage and exports
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a string does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}

/// Payment methods accepted by the shop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "Efectivo")]
    Cash,
    Yape,
    Plin,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Yape, PaymentMethod::Plin];

    /// Stored and displayed value
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Efectivo",
            PaymentMethod::Yape => "Yape",
            PaymentMethod::Plin => "Plin",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseVariantError;

    /// Accepts the stored value or the English name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "efectivo" | "cash" => Ok(PaymentMethod::Cash),
            "yape" => Ok(PaymentMethod::Yape),
            "plin" => Ok(PaymentMethod::Plin),
            _ => Err(ParseVariantError {
                kind: "payment method",
                value: s.to_string(),
            }),
        }
    }
}

/// How the order reaches the buyer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DeliveryMethod {
    #[default]
    #[serde(rename = "Recojo")]
    Pickup,
    Yango,
    InDriver,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::Pickup,
        DeliveryMethod::Yango,
        DeliveryMethod::InDriver,
    ];

    /// Stored and displayed value
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "Recojo",
            DeliveryMethod::Yango => "Yango",
            DeliveryMethod::InDriver => "InDriver",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recojo" | "pickup" => Ok(DeliveryMethod::Pickup),
            "yango" => Ok(DeliveryMethod::Yango),
            "indriver" => Ok(DeliveryMethod::InDriver),
            _ => Err(ParseVariantError {
                kind: "delivery method",
                value: s.to_string(),
            }),
        }
    }
}

/// A recorded sale
///
/// `profit` is always `price - cost`. The amounts are private: a sale is
/// built from a [`SaleInput`] (edits go through [`Sale::to_input`]) or
/// deserialized through [`StoredSale`], and both derive profit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "StoredSale")]
pub struct Sale {
    pub id: String,
    /// Calendar date as entered (`YYYY-MM-DD`)
    pub date: String,
    pub buyer_name: String,
    pub buyer_phone: String,
    pub product: String,
    cost: Decimal,
    price: Decimal,
    profit: Decimal,
    pub payment_method: PaymentMethod,
    pub delivery_method: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation instant in epoch milliseconds
    pub timestamp: i64,
}

/// Wire shape of a persisted sale.
///
/// Older blobs store amounts as JSON numbers and may carry a stale profit;
/// both are accepted and profit is recomputed on conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSale {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub buyer_name: String,
    #[serde(default)]
    pub buyer_phone: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub profit: Option<Decimal>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

impl From<StoredSale> for Sale {
    fn from(s: StoredSale) -> Self {
        Sale {
            id: s.id,
            date: s.date,
            buyer_name: s.buyer_name,
            buyer_phone: s.buyer_phone,
            product: s.product,
            cost: s.cost,
            price: s.price,
            profit: s.price.saturating_sub(s.cost),
            payment_method: s.payment_method,
            delivery_method: s.delivery_method,
            notes: s.notes,
            timestamp: s.timestamp,
        }
    }
}

impl Sale {
    pub fn cost(&self) -> Decimal {
        self.cost
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn profit(&self) -> Decimal {
        self.profit
    }

    /// Parsed sale date, `None` when empty or malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), SALE_DATE_FORMAT).ok()
    }

    /// Editable form for re-submission (keeps id and timestamp)
    pub fn to_input(&self) -> SaleInput {
        SaleInput {
            id: Some(self.id.clone()),
            date: self.date.clone(),
            buyer_name: self.buyer_name.clone(),
            buyer_phone: self.buyer_phone.clone(),
            product: self.product.clone(),
            cost: self.cost,
            price: self.price,
            payment_method: self.payment_method,
            delivery_method: self.delivery_method,
            notes: self.notes.clone(),
            timestamp: Some(self.timestamp),
        }
    }
}

/// Sale form submission
///
/// A submission without an id creates a sale; one with an id replaces the
/// stored sale in full.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleInput {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(custom = "validate_sale_date")]
    #[serde(default)]
    pub date: String,
    #[validate(length(min = 1, message = "Buyer name is required"))]
    #[serde(default)]
    pub buyer_name: String,
    #[validate(custom = "validate_buyer_phone")]
    #[serde(default)]
    pub buyer_phone: String,
    #[validate(length(min = 1, message = "Product is required"))]
    #[serde(default)]
    pub product: String,
    #[validate(custom = "validate_cost")]
    #[serde(default)]
    pub cost: Decimal,
    #[validate(custom = "validate_price")]
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub delivery_method: DeliveryMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl SaleInput {
    /// Build the sale to persist, assigning id and timestamp when absent
    pub fn into_sale(self, now_millis: i64) -> Sale {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let notes = self.notes.filter(|n| !n.is_empty());

        Sale {
            id,
            date: self.date,
            buyer_name: self.buyer_name,
            buyer_phone: self.buyer_phone,
            product: self.product,
            cost: self.cost,
            price: self.price,
            profit: self.price.saturating_sub(self.cost),
            payment_method: self.payment_method,
            delivery_method: self.delivery_method,
            notes,
            timestamp: self.timestamp.unwrap_or(now_millis),
        }
    }
}
