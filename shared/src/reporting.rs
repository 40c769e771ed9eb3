//! Filter stage and aggregation engine for the sales report
//!
//! Everything here is a pure function of its arguments: no I/O, no shared
//! state, safe to call from any thread.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{GrandTotals, GroupBy, GroupSummary, Sale};
use crate::types::{MonthSelector, PaymentSelector};

// ============================================================================
// Filter Stage
// ============================================================================

/// Sales within the selected month and payment method.
///
/// A sale whose date is empty or malformed never matches a specific month;
/// it is kept only when the month selector is the wildcard. Output order
/// follows the input.
pub fn filter_sales(sales: &[Sale], month: MonthSelector, payment: PaymentSelector) -> Vec<Sale> {
    sales
        .iter()
        .filter(|sale| matches_month(sale, month) && payment.matches(sale.payment_method))
        .cloned()
        .collect()
}

fn matches_month(sale: &Sale, month: MonthSelector) -> bool {
    match month {
        MonthSelector::All => true,
        selected => sale.parsed_date().is_some_and(|date| selected.contains(date)),
    }
}

/// Sort most recent first: date descending, then timestamp descending.
/// Sales with a malformed date go last.
pub fn sort_chronological(sales: &mut [Sale]) {
    sales.sort_by(|a, b| match (a.parsed_date(), b.parsed_date()) {
        (Some(da), Some(db)) => db.cmp(&da).then_with(|| b.timestamp.cmp(&a.timestamp)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.timestamp.cmp(&a.timestamp),
    });
}

// ============================================================================
// Aggregation Engine
// ============================================================================

/// Group sales by a dimension and rank the groups by total sales.
///
/// Groups are created in first-seen order and then stably sorted by
/// `total_sales` descending, so equal totals keep their first-seen order.
/// Keys are the raw field values: "Juan" and "Juan " are different groups.
pub fn aggregate(sales: &[Sale], group_by: GroupBy) -> Vec<GroupSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupSummary> = Vec::new();

    for sale in sales {
        let key = group_by.key_of(sale);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupSummary::new(key));
            groups.len() - 1
        });
        groups[slot].add(sale);
    }

    groups.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    groups
}

/// Additive fold over group summaries
pub fn grand_totals(summaries: &[GroupSummary]) -> GrandTotals {
    summaries.iter().fold(GrandTotals::default(), |acc, group| GrandTotals {
        count: acc.count + group.count,
        total_sales: acc.total_sales.saturating_add(group.total_sales),
        total_cost: acc.total_cost.saturating_add(group.total_cost),
        total_profit: acc.total_profit.saturating_add(group.total_profit),
    })
}

/// Totals over ungrouped sales (the headline figures of a listing)
pub fn summarize(sales: &[Sale]) -> GrandTotals {
    sales.iter().fold(GrandTotals::default(), |acc, sale| GrandTotals {
        count: acc.count + 1,
        total_sales: acc.total_sales.saturating_add(sale.price()),
        total_cost: acc.total_cost.saturating_add(sale.cost()),
        total_profit: acc.total_profit.saturating_add(sale.profit()),
    })
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Profit as a percentage of sales; 0 when there are no sales.
///
/// A ratio too large for `Decimal` saturates toward the sign of the profit.
pub fn margin_percent(profit: Decimal, sales: Decimal) -> Decimal {
    if sales <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    profit
        .checked_div(sales)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if profit.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// Bar width per group as a percentage of the largest total.
///
/// Empty input yields no bars. When the largest total is not positive every
/// bar is 0.
pub fn bar_widths(summaries: &[GroupSummary]) -> Vec<Decimal> {
    let Some(max) = summaries.iter().map(|g| g.total_sales).max() else {
        return Vec::new();
    };

    summaries
        .iter()
        .map(|g| {
            if max > Decimal::ZERO {
                g.total_sales
                    .checked_div(max)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            }
        })
        .collect()
}

/// The first `n` entries of a ranking
pub fn top<T>(ranked: &[T], n: usize) -> &[T] {
    &ranked[..n.min(ranked.len())]
}
