use std::fs;
use std::io::Write;
use std::path::Path;

use super::load_sales;
use crate::error::{AppError, AppResult};
use crate::services::export::{export_filename, export_to_csv, export_to_tsv};
use crate::services::reporting::filtered_sales;
use crate::services::ReportFilter;
use crate::AppState;

pub fn csv<W: Write>(state: &AppState, filter: ReportFilter, out_dir: &Path, out: &mut W) -> AppResult<()> {
    let sales = filtered_sales(&load_sales(state, out)?, filter);
    let contents = export_to_csv(&sales)?;

    let path = out_dir.join(export_filename(&state.config.app.slug, filter.month));
    fs::write(&path, contents)
        .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;

    tracing::info!(path = %path.display(), rows = sales.len(), "Exported sales");
    writeln!(out, "{} ventas exportadas a {}", sales.len(), path.display())?;
    Ok(())
}

pub fn tsv<W: Write>(
    state: &AppState,
    filter: ReportFilter,
    file: Option<&Path>,
    out: &mut W,
) -> AppResult<()> {
    let sales = filtered_sales(&load_sales(state, out)?, filter);
    let contents = export_to_tsv(&sales);

    match file {
        Some(path) => {
            fs::write(path, contents)
                .map_err(|e| AppError::Export(format!("{}: {}", path.display(), e)))?;
            writeln!(out, "{} ventas copiadas a {}", sales.len(), path.display())?;
        }
        None => writeln!(out, "{}", contents)?,
    }
    Ok(())
}
