//! Boom Art Sales
//!
//! Sales record keeping for a small 3D printing shop: record sales, report
//! on them by month and payment method, export them and ask an assistant
//! questions about them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod external;
pub mod services;
pub mod storage;

use std::sync::Arc;

use crate::config::Config;
use crate::services::{AuthService, SaleService, Session};
use crate::storage::{BlobStore, FileBlobStore};

/// Application state shared by every command
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn BlobStore>,
    pub session: Session,
}

impl AppState {
    /// State backed by the on-disk store from the configuration
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(config.storage.data_dir.clone()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn BlobStore>) -> Self {
        let session = Session::load(store.clone(), config.storage.session_key.clone());
        Self {
            config: Arc::new(config),
            store,
            session,
        }
    }

    pub fn sales(&self) -> SaleService {
        SaleService::new(self.store.clone(), self.config.storage.sales_key.clone())
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.config.users.clone())
    }
}
