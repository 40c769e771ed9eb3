//! Plain-text rendering of listings and reports

use std::fmt::Write;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use shared::{format_percent, format_soles, GrandTotals, Sale};

use crate::services::{PivotReport, ReportFilter};

/// Width of a full (100%) bar in characters
pub const BAR_COLUMNS: u32 = 30;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn describe_filter(filter: &ReportFilter) -> String {
    format!("mes: {} | pago: {}", filter.month, filter.payment)
}

pub fn bar(width: Decimal) -> String {
    let width = width.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let columns = (width * Decimal::from(BAR_COLUMNS) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0);
    "█".repeat(columns.min(BAR_COLUMNS as usize))
}

pub fn sales_table(sales: &[Sale]) -> String {
    if sales.is_empty() {
        return "No hay ventas para este filtro.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:<20}  {:<20}  {:>12}  {:>12}  {:<8}  {:<8}  {}",
        "Fecha", "Cliente", "Producto", "Precio", "Utilidad", "Pago", "Entrega", "ID"
    );
    for sale in sales {
        let _ = writeln!(
            out,
            "{:<10}  {:<20}  {:<20}  {:>12}  {:>12}  {:<8}  {:<8}  {}",
            truncate(&sale.date, 10),
            truncate(&sale.buyer_name, 20),
            truncate(&sale.product, 20),
            format_soles(sale.price()),
            format_soles(sale.profit()),
            sale.payment_method,
            sale.delivery_method,
            sale.id,
        );
    }
    out
}

/// Full detail of one sale
pub fn sale_detail(sale: &Sale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", sale.id);
    let _ = writeln!(out, "Fecha:     {}", sale.date);
    let _ = writeln!(out, "Cliente:   {}", sale.buyer_name);
    if !sale.buyer_phone.is_empty() {
        let _ = writeln!(out, "Teléfono:  {}", sale.buyer_phone);
    }
    let _ = writeln!(out, "Producto:  {}", sale.product);
    let _ = writeln!(out, "Costo:     {}", format_soles(sale.cost()));
    let _ = writeln!(out, "Precio:    {}", format_soles(sale.price()));
    let _ = writeln!(out, "Utilidad:  {}", format_soles(sale.profit()));
    let _ = writeln!(out, "Pago:      {}", sale.payment_method);
    let _ = writeln!(out, "Entrega:   {}", sale.delivery_method);
    if let Some(notes) = &sale.notes {
        let _ = writeln!(out, "Notas:     {}", notes);
    }
    out
}

pub fn summary(totals: &GrandTotals, filter: &ReportFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resumen ({})", describe_filter(filter));
    let _ = writeln!(out, "  Ventas totales:  {}", format_soles(totals.total_sales));
    let _ = writeln!(out, "  Costo total:     {}", format_soles(totals.total_cost));
    let _ = writeln!(out, "  Utilidad:        {}", format_soles(totals.total_profit));
    let _ = writeln!(out, "  Margen:          {}", format_percent(totals.margin_percent()));
    let _ = writeln!(out, "  Registros:       {}", totals.count);
    out
}

pub fn pivot(report: &PivotReport, filter: &ReportFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Reporte por {} ({})",
        report.group_by.label(),
        describe_filter(filter)
    );

    if report.is_empty() {
        out.push_str("No hay datos para este filtro.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<24}  {:>5}  {:>12}  {:>12}  {:>7}  {}",
        report.group_by.label(),
        "Cant.",
        "Ventas",
        "Utilidad",
        "Margen",
        ""
    );
    for row in &report.rows {
        let key = if row.group.key.is_empty() {
            "(vacío)"
        } else {
            row.group.key.as_str()
        };
        let _ = writeln!(
            out,
            "{:<24}  {:>5}  {:>12}  {:>12}  {:>7}  {}",
            truncate(key, 24),
            row.group.count,
            format_soles(row.group.total_sales),
            format_soles(row.group.total_profit),
            format_percent(row.margin_percent),
            bar(row.bar_width),
        );
    }
    let _ = writeln!(
        out,
        "{:<24}  {:>5}  {:>12}  {:>12}  {:>7}",
        "Total",
        report.totals.count,
        format_soles(report.totals.total_sales),
        format_soles(report.totals.total_profit),
        format_percent(report.totals.margin_percent()),
    );
    out.push_str(&highlights(report));
    out
}

/// Top three groups by sales, and their margins
pub fn highlights(report: &PivotReport) -> String {
    let top = report.top(3);
    let mut out = String::new();

    let _ = writeln!(out, "\nTop Rendimiento");
    for (i, row) in top.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<24}  {:>12}",
            i + 1,
            truncate(&row.group.key, 24),
            format_soles(row.group.total_sales)
        );
    }

    let _ = writeln!(out, "\nRentabilidad ({})", report.group_by.label());
    for row in top {
        let _ = writeln!(
            out,
            "  {:<27}  {:>7}",
            truncate(&row.group.key, 27),
            format_percent(row.margin_percent)
        );
    }
    out
}
