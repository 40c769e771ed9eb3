//! WebAssembly module for Boom Art Sales
//!
//! Provides client-side computation for:
//! - Month / payment filtering and grouped sales reports
//! - Headline totals and margins
//! - Sale form validation before saving to local storage
//!
//! Sales cross the boundary as JSON in the same shape the app stores them.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::reporting::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Grouped report handed back to JavaScript
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportPayload {
    groups: Vec<GroupSummary>,
    bar_widths: Vec<Decimal>,
    totals: GrandTotals,
}

fn parse_sales(sales_json: &str) -> Result<Vec<Sale>, String> {
    serde_json::from_str(sales_json).map_err(|e| format!("Invalid sales JSON: {}", e))
}

fn parse_filter(month: &str, payment: &str) -> Result<(MonthSelector, PaymentSelector), String> {
    let month = month.parse::<MonthSelector>().map_err(|e| e.to_string())?;
    let payment = payment.parse::<PaymentSelector>().map_err(|e| e.to_string())?;
    Ok((month, payment))
}

fn build_report(sales_json: &str, month: &str, payment: &str, group_by: &str) -> Result<String, String> {
    let sales = parse_sales(sales_json)?;
    let (month, payment) = parse_filter(month, payment)?;
    let group_by = group_by.parse::<GroupBy>().map_err(|e| e.to_string())?;

    let groups = aggregate(&filter_sales(&sales, month, payment), group_by);
    let payload = ReportPayload {
        bar_widths: bar_widths(&groups),
        totals: grand_totals(&groups),
        groups,
    };
    serde_json::to_string(&payload).map_err(|e| e.to_string())
}

fn build_listing(sales_json: &str, month: &str, payment: &str) -> Result<String, String> {
    let sales = parse_sales(sales_json)?;
    let (month, payment) = parse_filter(month, payment)?;

    let mut filtered = filter_sales(&sales, month, payment);
    sort_chronological(&mut filtered);
    serde_json::to_string(&filtered).map_err(|e| e.to_string())
}

fn build_summary(sales_json: &str, month: &str, payment: &str) -> Result<String, String> {
    let sales = parse_sales(sales_json)?;
    let (month, payment) = parse_filter(month, payment)?;
    serde_json::to_string(&summarize(&filter_sales(&sales, month, payment))).map_err(|e| e.to_string())
}

fn prepare_sale(input_json: &str, now_millis: i64) -> Result<String, String> {
    let input: SaleInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid sale JSON: {}", e))?;
    validate_sale_input(&input).map_err(|e| format!("{}: {}", e.field, e.message))?;
    serde_json::to_string(&input.into_sale(now_millis)).map_err(|e| e.to_string())
}

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Group the filtered sales and rank the groups by total sales
#[wasm_bindgen]
pub fn sales_report(
    sales_json: &str,
    month: &str,
    payment: &str,
    group_by: &str,
) -> Result<String, JsValue> {
    build_report(sales_json, month, payment, group_by).map_err(to_js_error)
}

/// Filtered sales, most recent first
#[wasm_bindgen]
pub fn filtered_sales(sales_json: &str, month: &str, payment: &str) -> Result<String, JsValue> {
    build_listing(sales_json, month, payment).map_err(to_js_error)
}

/// Headline totals of the filtered sales
#[wasm_bindgen]
pub fn sales_summary(sales_json: &str, month: &str, payment: &str) -> Result<String, JsValue> {
    build_summary(sales_json, month, payment).map_err(to_js_error)
}

/// Validate a sale form and return the record to store, with id and timestamp
#[wasm_bindgen]
pub fn prepare_sale_record(input_json: &str) -> Result<String, JsValue> {
    prepare_sale(input_json, js_sys::Date::now() as i64).map_err(to_js_error)
}

/// Profit as a percentage of sales (0 when there are no sales)
#[wasm_bindgen]
pub fn calculate_margin(profit: f64, sales: f64) -> f64 {
    let profit = Decimal::try_from(profit).unwrap_or(Decimal::ZERO);
    let sales = Decimal::try_from(sales).unwrap_or(Decimal::ZERO);
    margin_percent(profit, sales).to_f64().unwrap_or(0.0)
}

/// Validate a buyer phone: empty or 9 digits
#[wasm_bindgen]
pub fn is_valid_phone(phone: &str) -> bool {
    validate_buyer_phone(phone).is_ok()
}

/// Format an amount as Soles, e.g. `S/ 50.00`
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    format_soles(Decimal::try_from(amount).unwrap_or(Decimal::ZERO))
}
