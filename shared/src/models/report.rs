//! Report models produced by the aggregation engine

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::sale::{ParseVariantError, Sale};

/// Dimension used to bucket sales in the pivot report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    #[default]
    Product,
    Date,
    PaymentMethod,
    DeliveryMethod,
    BuyerName,
}

impl GroupBy {
    pub const ALL: [GroupBy; 5] = [
        GroupBy::Product,
        GroupBy::Date,
        GroupBy::PaymentMethod,
        GroupBy::DeliveryMethod,
        GroupBy::BuyerName,
    ];

    /// Raw grouping key of a sale. No trimming or case folding.
    pub fn key_of<'a>(&self, sale: &'a Sale) -> &'a str {
        match self {
            GroupBy::Product => &sale.product,
            GroupBy::Date => &sale.date,
            GroupBy::PaymentMethod => sale.payment_method.as_str(),
            GroupBy::DeliveryMethod => sale.delivery_method.as_str(),
            GroupBy::BuyerName => &sale.buyer_name,
        }
    }

    /// Column heading shown in reports
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::Product => "Producto",
            GroupBy::Date => "Fecha",
            GroupBy::PaymentMethod => "Medio de Pago",
            GroupBy::DeliveryMethod => "Método de Entrega",
            GroupBy::BuyerName => "Cliente",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Product => "product",
            GroupBy::Date => "date",
            GroupBy::PaymentMethod => "paymentMethod",
            GroupBy::DeliveryMethod => "deliveryMethod",
            GroupBy::BuyerName => "buyerName",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "product" => Ok(GroupBy::Product),
            "date" => Ok(GroupBy::Date),
            "paymentmethod" | "payment" => Ok(GroupBy::PaymentMethod),
            "deliverymethod" | "delivery" => Ok(GroupBy::DeliveryMethod),
            "buyername" | "buyer" => Ok(GroupBy::BuyerName),
            _ => Err(ParseVariantError {
                kind: "grouping dimension",
                value: s.to_string(),
            }),
        }
    }
}

/// Totals for one bucket of a grouping dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: String,
    pub count: u64,
    pub total_sales: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

impl GroupSummary {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            count: 0,
            total_sales: Decimal::ZERO,
            total_cost: Decimal::ZERO,
            total_profit: Decimal::ZERO,
        }
    }

    /// Fold one sale into the bucket
    pub fn add(&mut self, sale: &Sale) {
        self.count += 1;
        self.total_sales = self.total_sales.saturating_add(sale.price());
        self.total_cost = self.total_cost.saturating_add(sale.cost());
        self.total_profit = self.total_profit.saturating_add(sale.profit());
    }

    pub fn margin_percent(&self) -> Decimal {
        crate::reporting::margin_percent(self.total_profit, self.total_sales)
    }
}

/// Sums over every group (or over the ungrouped sales)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotals {
    pub count: u64,
    pub total_sales: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
}

impl GrandTotals {
    pub fn margin_percent(&self) -> Decimal {
        crate::reporting::margin_percent(self.total_profit, self.total_sales)
    }
}
