use std::io::Write;

use shared::GroupBy;

use super::{load_sales, render};
use crate::error::AppResult;
use crate::services::reporting::{filtered_sales, pivot_report, sales_view};
use crate::services::ReportFilter;
use crate::AppState;

pub fn list<W: Write>(state: &AppState, filter: ReportFilter, out: &mut W) -> AppResult<()> {
    let sales = load_sales(state, out)?;
    let view = sales_view(&sales, filter);
    write!(out, "{}", render::sales_table(&view.sales))?;
    write!(out, "{}", render::summary(&view.summary, &filter))?;
    Ok(())
}

pub fn summary<W: Write>(state: &AppState, filter: ReportFilter, out: &mut W) -> AppResult<()> {
    let sales = load_sales(state, out)?;
    let view = sales_view(&sales, filter);
    write!(out, "{}", render::summary(&view.summary, &filter))?;
    Ok(())
}

pub fn pivot<W: Write>(
    state: &AppState,
    filter: ReportFilter,
    group_by: GroupBy,
    out: &mut W,
) -> AppResult<()> {
    let sales = load_sales(state, out)?;
    let report = pivot_report(&filtered_sales(&sales, filter), group_by);
    write!(out, "{}", render::pivot(&report, &filter))?;
    Ok(())
}
