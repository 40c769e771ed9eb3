//! Record store tests
//!
//! - Property 7: a saved sale reloads with identical fields
//! - Blobs written by earlier versions of the app still load

use std::path::PathBuf;
use std::sync::Arc;

use boom_art_sales::services::SaleService;
use boom_art_sales::storage::{BlobStore, FileBlobStore};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{DeliveryMethod, PaymentMethod, Sale, SaleInput};

const KEY: &str = "boom_art_sales_data";

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("boom-sales-test-{}", uuid::Uuid::new_v4())))
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn sale_input_strategy() -> impl Strategy<Value = SaleInput> {
    (
        (2020i32..=2030, 1u32..=12, 1u32..=28),
        "[A-Za-zÁÉÍÓÚáéíóúñ ]{1,30}",
        prop_oneof![Just(String::new()), "9[0-9]{8}"],
        "[A-Za-z0-9 \"',]{1,30}",
        (0i64..=100_000, 1i64..=100_000),
        prop::sample::select(PaymentMethod::ALL.to_vec()),
        prop::sample::select(DeliveryMethod::ALL.to_vec()),
        prop::option::of("[a-z \n]{1,40}"),
    )
        .prop_map(
            |((y, m, d), buyer, phone, product, (cost, price), payment, delivery, notes)| {
                SaleInput {
                    id: None,
                    date: format!("{:04}-{:02}-{:02}", y, m, d),
                    buyer_name: buyer,
                    buyer_phone: phone,
                    product,
                    cost: Decimal::new(cost, 2),
                    price: Decimal::new(price, 2),
                    payment_method: payment,
                    delivery_method: delivery,
                    notes,
                    timestamp: None,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property 7: persist then reload yields the same record
    #[test]
    fn prop_saved_sale_round_trips(input in sale_input_strategy(), now in 0i64..=4_102_444_800_000) {
        let dir = TempDir::new();
        let store = Arc::new(FileBlobStore::new(dir.0.clone()));
        let service = SaleService::new(store.clone(), KEY);

        let (saved, _) = service.submit(input, now).unwrap();

        // a fresh service over the same directory sees the same data
        let reloaded = SaleService::new(Arc::new(FileBlobStore::new(dir.0.clone())), KEY).get(&saved.id).unwrap();
        prop_assert_eq!(&reloaded, &saved);
        prop_assert_eq!(reloaded.profit(), reloaded.price() - reloaded.cost());
        prop_assert_eq!(reloaded.timestamp, now);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_legacy_blob_with_numeric_amounts_loads() {
    let dir = TempDir::new();
    let store = FileBlobStore::new(dir.0.clone());
    store
        .set(
            KEY,
            r#"[{"id":"1700000000000","date":"2024-01-15","buyerName":"Ana","buyerPhone":"912345678",
                "product":"Vase","cost":20.5,"price":50,"profit":999,"paymentMethod":"Yape",
                "deliveryMethod":"Yango","notes":"","timestamp":1700000000000}]"#,
        )
        .unwrap();

    let service = SaleService::new(Arc::new(store), KEY);
    let loaded = service.load();
    assert!(!loaded.degraded);

    let sale = &loaded.sales[0];
    assert_eq!(sale.id, "1700000000000");
    assert_eq!(sale.cost(), Decimal::new(205, 1));
    assert_eq!(sale.price(), Decimal::from(50));
    // stale profit is re-derived
    assert_eq!(sale.profit(), Decimal::new(295, 1));
    assert_eq!(sale.payment_method, PaymentMethod::Yape);
    assert_eq!(sale.delivery_method, DeliveryMethod::Yango);
}

#[test]
fn test_written_blob_uses_camel_case_field_names() {
    let dir = TempDir::new();
    let store = Arc::new(FileBlobStore::new(dir.0.clone()));
    let service = SaleService::new(store.clone(), KEY);

    let (sale, _) = service
        .submit(
            SaleInput {
                date: "2024-01-15".to_string(),
                buyer_name: "Ana".to_string(),
                product: "Vase".to_string(),
                cost: Decimal::from(20),
                price: Decimal::from(50),
                payment_method: PaymentMethod::Plin,
                delivery_method: DeliveryMethod::InDriver,
                ..Default::default()
            },
            42,
        )
        .unwrap();

    let blob = store.get(KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let record = &json[0];

    assert_eq!(record["id"], sale.id.as_str());
    assert_eq!(record["buyerName"], "Ana");
    assert_eq!(record["paymentMethod"], "Plin");
    assert_eq!(record["deliveryMethod"], "InDriver");
    assert_eq!(record["profit"], "30");
    assert_eq!(record["timestamp"], 42);
    assert!(record.get("notes").is_none());
}

#[test]
fn test_missing_store_directory_reads_empty() {
    let dir = TempDir::new();
    let service = SaleService::new(Arc::new(FileBlobStore::new(dir.0.clone())), KEY);
    let loaded = service.load();
    assert!(loaded.sales.is_empty());
    assert!(!loaded.degraded);
    let sales: Vec<Sale> = service.list();
    assert!(sales.is_empty());
}
