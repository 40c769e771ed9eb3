//! Business logic services

pub mod assistant;
pub mod auth;
pub mod export;
pub mod reporting;
pub mod sales;

pub use assistant::{Conversation, LanguageModel};
pub use auth::{AuthService, Session};
pub use reporting::{PivotReport, ReportFilter, SalesView};
pub use sales::{LoadedSales, SaleService};
