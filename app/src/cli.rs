//! Command line arguments

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use shared::{DeliveryMethod, GroupBy, MonthSelector, PaymentMethod, PaymentSelector, SaleInput};

use crate::services::ReportFilter;

#[derive(Parser, Debug)]
#[command(name = "boom-sales", version, about = "Registro de ventas de Boom Art")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with an authorized email and PIN
    Login {
        #[arg(value_name = "EMAIL")]
        email: String,
        #[arg(value_name = "PIN")]
        pin: String,
    },
    /// Forget the saved login
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Record a new sale
    Add(SaleArgs),
    /// Replace the fields of an existing sale
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[command(flatten)]
        changes: SaleChanges,
    },
    /// Delete a sale
    Delete {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
        yes: bool,
    },
    /// List sales, most recent first
    List(FilterArgs),
    /// Headline totals for the filtered sales
    Summary(FilterArgs),
    /// Group the filtered sales and rank the groups by total sales
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(
            short = 'g',
            long = "group-by",
            value_name = "DIMENSION",
            default_value = "product",
            help = "product, date, payment, delivery or buyer"
        )]
        group_by: GroupBy,
    },
    /// Write the filtered sales to a CSV file
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(short = 'o', long = "out-dir", value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the filtered sales as tab-separated rows for a spreadsheet
    Copy {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// List distinct buyer names
    Customers,
    /// Ask the assistant one question about the filtered sales
    Ask {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Chat with the assistant about the filtered sales
    Chat {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(
        short = 'm',
        long = "month",
        value_name = "YYYY-MM",
        help = "Month to show, or 'all' (default: current month)"
    )]
    pub month: Option<MonthSelector>,
    #[arg(
        short = 'p',
        long = "payment",
        value_name = "METHOD",
        default_value = "all",
        help = "Efectivo, Yape, Plin or 'all'"
    )]
    pub payment: PaymentSelector,
}

impl FilterArgs {
    pub fn to_filter(&self, today: NaiveDate) -> ReportFilter {
        ReportFilter {
            month: self.month.unwrap_or_else(|| MonthSelector::of(today)),
            payment: self.payment,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct SaleArgs {
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD", help = "Sale date (default: today)")]
    pub date: Option<String>,
    #[arg(short = 'b', long = "buyer", value_name = "NAME")]
    pub buyer_name: String,
    #[arg(long = "phone", value_name = "PHONE", default_value = "", help = "9 digits")]
    pub buyer_phone: String,
    #[arg(short = 'P', long = "product", value_name = "PRODUCT")]
    pub product: String,
    #[arg(short = 'c', long = "cost", value_name = "AMOUNT", default_value = "0")]
    pub cost: Decimal,
    #[arg(short = 's', long = "price", value_name = "AMOUNT")]
    pub price: Decimal,
    #[arg(long = "pay", value_name = "METHOD", default_value = "Efectivo")]
    pub payment_method: PaymentMethod,
    #[arg(long = "delivery", value_name = "METHOD", default_value = "Recojo")]
    pub delivery_method: DeliveryMethod,
    #[arg(short = 'n', long = "notes", value_name = "TEXT")]
    pub notes: Option<String>,
}

impl SaleArgs {
    pub fn into_input(self, today: NaiveDate) -> SaleInput {
        SaleInput {
            id: None,
            date: self.date.unwrap_or_else(|| today.format(shared::SALE_DATE_FORMAT).to_string()),
            buyer_name: self.buyer_name,
            buyer_phone: self.buyer_phone,
            product: self.product,
            cost: self.cost,
            price: self.price,
            payment_method: self.payment_method,
            delivery_method: self.delivery_method,
            notes: self.notes,
            timestamp: None,
        }
    }
}

/// Fields to change on an existing sale; omitted fields keep their value
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SaleChanges {
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<String>,
    #[arg(short = 'b', long = "buyer", value_name = "NAME")]
    pub buyer_name: Option<String>,
    #[arg(long = "phone", value_name = "PHONE")]
    pub buyer_phone: Option<String>,
    #[arg(short = 'P', long = "product", value_name = "PRODUCT")]
    pub product: Option<String>,
    #[arg(short = 'c', long = "cost", value_name = "AMOUNT")]
    pub cost: Option<Decimal>,
    #[arg(short = 's', long = "price", value_name = "AMOUNT")]
    pub price: Option<Decimal>,
    #[arg(long = "pay", value_name = "METHOD")]
    pub payment_method: Option<PaymentMethod>,
    #[arg(long = "delivery", value_name = "METHOD")]
    pub delivery_method: Option<DeliveryMethod>,
    #[arg(short = 'n', long = "notes", value_name = "TEXT", help = "New notes; empty clears them")]
    pub notes: Option<String>,
}

impl SaleChanges {
    pub fn apply(self, input: &mut SaleInput) {
        if let Some(date) = self.date {
            input.date = date;
        }
        if let Some(name) = self.buyer_name {
            input.buyer_name = name;
        }
        if let Some(phone) = self.buyer_phone {
            input.buyer_phone = phone;
        }
        if let Some(product) = self.product {
            input.product = product;
        }
        if let Some(cost) = self.cost {
            input.cost = cost;
        }
        if let Some(price) = self.price {
            input.price = price;
        }
        if let Some(method) = self.payment_method {
            input.payment_method = method;
        }
        if let Some(method) = self.delivery_method {
            input.delivery_method = method;
        }
        if let Some(notes) = self.notes {
            input.notes = Some(notes);
        }
    }
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
