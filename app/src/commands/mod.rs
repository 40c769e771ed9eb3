//! Command handlers
//!
//! Each handler writes its human-readable output to `out`. Everything except
//! the session commands requires a logged-in user.

mod assistant;
mod export;
pub mod render;
mod report;
mod sales;
mod session;

use std::io::{BufRead, Write};

use crate::cli::{today, Command};
use crate::error::AppResult;
use crate::AppState;

/// Run one command
pub async fn run<R: BufRead, W: Write>(
    state: &mut AppState,
    command: Command,
    input: &mut R,
    out: &mut W,
) -> AppResult<()> {
    match command {
        Command::Login { email, pin } => return session::login(state, &email, &pin, out),
        Command::Logout => return session::logout(state, out),
        Command::Whoami => return session::whoami(state, out),
        _ => {}
    }

    let user = state.session.require_user()?;
    tracing::debug!(user = %user.email, ?command, "Running command");
    let today = today();

    match command {
        Command::Add(args) => sales::add(state, args.into_input(today), out),
        Command::Edit { id, changes } => sales::edit(state, &id, changes, out),
        Command::Delete { id, yes } => sales::delete(state, &id, yes, input, out),
        Command::Customers => sales::customers(state, out),
        Command::List(filter) => report::list(state, filter.to_filter(today), out),
        Command::Summary(filter) => report::summary(state, filter.to_filter(today), out),
        Command::Report { filter, group_by } => {
            report::pivot(state, filter.to_filter(today), group_by, out)
        }
        Command::Export { filter, out_dir } => {
            export::csv(state, filter.to_filter(today), &out_dir, out)
        }
        Command::Copy { filter, out: file } => {
            export::tsv(state, filter.to_filter(today), file.as_deref(), out)
        }
        Command::Ask { filter, question } => {
            assistant::ask(state, filter.to_filter(today), &question.join(" "), out).await
        }
        Command::Chat { filter } => {
            assistant::chat(state, filter.to_filter(today), input, out).await
        }
        Command::Login { .. } | Command::Logout | Command::Whoami => Ok(()),
    }
}

/// Load every sale, telling the user when stored data could not be read
fn load_sales<W: Write>(state: &AppState, out: &mut W) -> AppResult<Vec<shared::Sale>> {
    let loaded = state.sales().load();
    if loaded.degraded {
        writeln!(
            out,
            "Aviso: no se pudieron leer las ventas guardadas; se muestra una lista vacía."
        )?;
    }
    Ok(loaded.sales)
}
