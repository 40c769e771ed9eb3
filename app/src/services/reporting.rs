//! Reporting service: filtered listings, headline totals and pivot reports

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    aggregate, bar_widths, filter_sales, grand_totals, sort_chronological, summarize, top, GrandTotals,
    GroupBy, GroupSummary, MonthSelector, PaymentSelector, Sale,
};

/// Report filter parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub month: MonthSelector,
    pub payment: PaymentSelector,
}

/// Filtered sales with their headline totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesView {
    pub sales: Vec<Sale>,
    pub summary: GrandTotals,
}

/// One row of the pivot report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRow {
    #[serde(flatten)]
    pub group: GroupSummary,
    pub margin_percent: Decimal,
    pub bar_width: Decimal,
}

/// Pivot report for one grouping dimension
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotReport {
    pub group_by: GroupBy,
    pub rows: Vec<PivotRow>,
    pub totals: GrandTotals,
}

impl PivotReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Best performing groups, as shown in the highlight panels
    pub fn top(&self, n: usize) -> &[PivotRow] {
        top(&self.rows, n)
    }
}

/// Filter and sort most recent first
pub fn filtered_sales(sales: &[Sale], filter: ReportFilter) -> Vec<Sale> {
    let mut filtered = filter_sales(sales, filter.month, filter.payment);
    sort_chronological(&mut filtered);
    filtered
}

/// Filtered listing with totals
pub fn sales_view(sales: &[Sale], filter: ReportFilter) -> SalesView {
    let sales = filtered_sales(sales, filter);
    let summary = summarize(&sales);
    SalesView { sales, summary }
}

/// Group already-filtered sales and decorate the rows for display
pub fn pivot_report(sales: &[Sale], group_by: GroupBy) -> PivotReport {
    let groups = aggregate(sales, group_by);
    let totals = grand_totals(&groups);
    let widths = bar_widths(&groups);

    let rows = groups
        .into_iter()
        .zip(widths)
        .map(|(group, bar_width)| PivotRow {
            margin_percent: group.margin_percent(),
            group,
            bar_width,
        })
        .collect();

    PivotReport {
        group_by,
        rows,
        totals,
    }
}
