//! CSV export and spreadsheet (tab-separated) copy of a sales listing

use shared::{to_fixed, MonthSelector, Sale};

use crate::error::{AppError, AppResult};

/// Header row of the CSV export
pub const CSV_HEADER: &str = "ID,Fecha,Cliente,Teléfono,Producto,Costo,Precio,Utilidad,Pago,Entrega,Notas";

/// Header row of the tab-separated copy (no ID column)
pub const TSV_HEADER: [&str; 10] = [
    "Fecha", "Cliente", "Teléfono", "Producto", "Costo", "Precio", "Utilidad", "Pago", "Entrega",
    "Notas",
];

const BOM: &str = "\u{FEFF}";

/// File name of a CSV export, e.g. `boom_art_ventas_2024-01.csv`
pub fn export_filename(slug: &str, month: MonthSelector) -> String {
    format!("{}_ventas_{}.csv", slug, month)
}

/// Render sales as CSV: UTF-8 BOM, plain header, every field quoted
pub fn export_to_csv(sales: &[Sale]) -> AppResult<String> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(BOM.as_bytes());
    buffer.extend_from_slice(CSV_HEADER.as_bytes());
    buffer.push(b'\n');

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer);

    for sale in sales {
        let cost = sale.cost().to_string();
        let price = sale.price().to_string();
        let profit = sale.profit().to_string();
        wtr.write_record([
            sale.id.as_str(),
            sale.date.as_str(),
            sale.buyer_name.as_str(),
            sale.buyer_phone.as_str(),
            sale.product.as_str(),
            cost.as_str(),
            price.as_str(),
            profit.as_str(),
            sale.payment_method.as_str(),
            sale.delivery_method.as_str(),
            sale.notes.as_deref().unwrap_or(""),
        ])
        .map_err(|e| AppError::Export(format!("CSV serialization error: {}", e)))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV writer error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("UTF-8 conversion error: {}", e)))
}

/// Render sales as tab-separated rows for pasting into a spreadsheet
pub fn export_to_tsv(sales: &[Sale]) -> String {
    let mut lines = Vec::with_capacity(sales.len() + 1);
    lines.push(TSV_HEADER.join("\t"));

    for sale in sales {
        let notes = sale
            .notes
            .as_deref()
            .unwrap_or("")
            .replace("\r\n", " ")
            .replace('\n', " ");
        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            sale.date,
            sale.buyer_name,
            sale.buyer_phone,
            sale.product,
            to_fixed(sale.cost(), 2),
            to_fixed(sale.price(), 2),
            to_fixed(sale.profit(), 2),
            sale.payment_method,
            sale.delivery_method,
            notes,
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{DeliveryMethod, PaymentMethod, SaleInput};

    fn sale(notes: Option<&str>) -> Sale {
        SaleInput {
            id: Some("id-1".to_string()),
            date: "2024-01-15".to_string(),
            buyer_name: "Ana \"La Jefa\" Ruiz".to_string(),
            buyer_phone: "912345678".to_string(),
            product: "Vase".to_string(),
            cost: Decimal::new(205, 1),
            price: Decimal::from(50),
            payment_method: PaymentMethod::Yape,
            delivery_method: DeliveryMethod::InDriver,
            notes: notes.map(str::to_string),
            timestamp: Some(1),
        }
        .into_sale(0)
    }

    #[test]
    fn test_export_filename() {
        let month = MonthSelector::Month { year: 2024, month: 1 };
        assert_eq!(export_filename("boom_art", month), "boom_art_ventas_2024-01.csv");
        assert_eq!(export_filename("boom_art", MonthSelector::All), "boom_art_ventas_all.csv");
    }

    #[test]
    fn test_csv_layout() {
        let csv = export_to_csv(&[sale(Some("entregar \"rápido\""))]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some(format!("{}{}", BOM, CSV_HEADER).as_str()));
        assert_eq!(
            lines.next(),
            Some(
                "\"id-1\",\"2024-01-15\",\"Ana \"\"La Jefa\"\" Ruiz\",\"912345678\",\"Vase\",\
                 \"20.5\",\"50\",\"29.5\",\"Yape\",\"InDriver\",\"entregar \"\"rápido\"\"\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_empty_listing_has_header_only() {
        let csv = export_to_csv(&[]).unwrap();
        assert_eq!(csv, format!("{}{}\n", BOM, CSV_HEADER));
    }

    #[test]
    fn test_tsv_layout() {
        let tsv = export_to_tsv(&[sale(Some("línea uno\nlínea dos"))]);
        let lines: Vec<_> = tsv.split('\n').collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Fecha\tCliente\tTeléfono\tProducto\tCosto\tPrecio\tUtilidad\tPago\tEntrega\tNotas"
        );
        assert_eq!(
            lines[1],
            "2024-01-15\tAna \"La Jefa\" Ruiz\t912345678\tVase\t20.50\t50.00\t29.50\tYape\tInDriver\tlínea uno línea dos"
        );
    }

    #[test]
    fn test_tsv_rounds_amounts_half_up() {
        let sale = SaleInput {
            date: "2024-01-15".to_string(),
            buyer_name: "Ana".to_string(),
            product: "Cup".to_string(),
            cost: Decimal::new(1005, 3),
            price: Decimal::new(2675, 3),
            ..Default::default()
        }
        .into_sale(0);
        let tsv = export_to_tsv(&[sale]);
        assert!(tsv.contains("\tCup\t1.01\t2.68\t1.67\t"));
    }

    #[test]
    fn test_tsv_without_notes() {
        let tsv = export_to_tsv(&[sale(None)]);
        assert!(tsv.ends_with("\tYape\tInDriver\t"));
    }
}
