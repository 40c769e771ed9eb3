use std::io::{BufRead, Write};

use chrono::Utc;
use shared::SaleInput;

use super::render;
use crate::cli::SaleChanges;
use crate::error::AppResult;
use crate::AppState;

pub fn add<W: Write>(state: &AppState, input: SaleInput, out: &mut W) -> AppResult<()> {
    let (sale, _) = state.sales().submit(input, Utc::now().timestamp_millis())?;
    writeln!(out, "Venta registrada")?;
    write!(out, "{}", render::sale_detail(&sale))?;
    Ok(())
}

pub fn edit<W: Write>(state: &AppState, id: &str, changes: SaleChanges, out: &mut W) -> AppResult<()> {
    let service = state.sales();
    let mut input = service.get(id)?.to_input();
    changes.apply(&mut input);

    let (sale, _) = service.submit(input, Utc::now().timestamp_millis())?;
    writeln!(out, "Venta actualizada")?;
    write!(out, "{}", render::sale_detail(&sale))?;
    Ok(())
}

pub fn delete<R: BufRead, W: Write>(
    state: &AppState,
    id: &str,
    yes: bool,
    input: &mut R,
    out: &mut W,
) -> AppResult<()> {
    let service = state.sales();
    let sale = service.get(id)?;

    if !yes {
        write!(out, "{}", render::sale_detail(&sale))?;
        write!(out, "¿Eliminar esta venta? (s/N) ")?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes") {
            writeln!(out, "Cancelado")?;
            return Ok(());
        }
    }

    service.delete(id)?;
    writeln!(out, "Venta eliminada")?;
    Ok(())
}

pub fn customers<W: Write>(state: &AppState, out: &mut W) -> AppResult<()> {
    for name in state.sales().unique_customers() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
