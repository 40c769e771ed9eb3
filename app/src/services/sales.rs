//! Sale service: read, upsert and delete sales in the blob store
//!
//! All sales live as one JSON array under a single key. Reads fail open to
//! an empty list so a damaged blob never stops the app; writes refuse to
//! run over a blob that cannot be read, so that damage is never made worse.

use std::collections::HashSet;
use std::sync::Arc;

use shared::{validate_sale_input, Sale, SaleInput};

use crate::error::{AppError, AppResult};
use crate::storage::BlobStore;

/// Sale service
#[derive(Clone)]
pub struct SaleService {
    store: Arc<dyn BlobStore>,
    key: String,
}

/// Result of a fail-open read
#[derive(Debug, Clone, Default)]
pub struct LoadedSales {
    pub sales: Vec<Sale>,
    /// The blob could not be read or parsed and `sales` is empty because of it
    pub degraded: bool,
}

impl SaleService {
    pub fn new(store: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read every sale, treating a storage failure as "no data"
    pub fn load(&self) -> LoadedSales {
        match self.read() {
            Ok(sales) => LoadedSales {
                sales,
                degraded: false,
            },
            Err(e) => {
                tracing::error!("Error loading sales: {}", e);
                LoadedSales {
                    sales: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    /// Read every sale in stored order
    pub fn list(&self) -> Vec<Sale> {
        self.load().sales
    }

    fn read(&self) -> AppResult<Vec<Sale>> {
        match self.store.get(&self.key)? {
            Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write(&self, sales: &[Sale]) -> AppResult<()> {
        let blob = serde_json::to_string(sales)?;
        self.store.set(&self.key, &blob)
    }

    /// Find a sale by id
    pub fn get(&self, id: &str) -> AppResult<Sale> {
        self.read()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound(format!("venta {}", id)))
    }

    /// Validate a form submission and persist it
    pub fn submit(&self, input: SaleInput, now_millis: i64) -> AppResult<(Sale, Vec<Sale>)> {
        validate_sale_input(&input)?;
        let sale = input.into_sale(now_millis);
        let sales = self.save(sale.clone())?;
        Ok((sale, sales))
    }

    /// Replace the sale with the same id in place, or insert it at the front
    pub fn save(&self, sale: Sale) -> AppResult<Vec<Sale>> {
        let mut sales = self.read()?;

        match sales.iter().position(|s| s.id == sale.id) {
            Some(index) => {
                tracing::info!(sale_id = %sale.id, "Updating sale");
                sales[index] = sale;
            }
            None => {
                tracing::info!(sale_id = %sale.id, "Recording new sale");
                sales.insert(0, sale);
            }
        }

        self.write(&sales)?;
        Ok(sales)
    }

    /// Delete a sale by id
    pub fn delete(&self, id: &str) -> AppResult<Vec<Sale>> {
        let mut sales = self.read()?;
        let before = sales.len();
        sales.retain(|s| s.id != id);

        if sales.len() == before {
            return Err(AppError::NotFound(format!("venta {}", id)));
        }

        tracing::info!(sale_id = %id, "Deleted sale");
        self.write(&sales)?;
        Ok(sales)
    }

    /// Distinct buyer names in first-seen order
    pub fn unique_customers(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.list()
            .into_iter()
            .filter_map(|s| {
                if seen.insert(s.buyer_name.clone()) {
                    Some(s.buyer_name)
                } else {
                    None
                }
            })
            .collect()
    }
}
