use std::io::{BufRead, Write};
use std::time::Duration;

use shared::Sale;

use super::load_sales;
use crate::error::AppResult;
use crate::external::GeminiClient;
use crate::services::reporting::filtered_sales;
use crate::services::{Conversation, ReportFilter};
use crate::AppState;

fn conversation(state: &AppState) -> AppResult<Conversation<GeminiClient>> {
    let config = &state.config.assistant;
    Ok(Conversation::new(
        GeminiClient::new(config)?,
        state.config.app.name.clone(),
        config.max_records,
        Duration::from_secs(config.timeout_secs),
    ))
}

fn context<W: Write>(state: &AppState, filter: ReportFilter, out: &mut W) -> AppResult<Vec<Sale>> {
    Ok(filtered_sales(&load_sales(state, out)?, filter))
}

pub async fn ask<W: Write>(
    state: &AppState,
    filter: ReportFilter,
    question: &str,
    out: &mut W,
) -> AppResult<()> {
    let sales = context(state, filter, out)?;
    let mut chat = conversation(state)?;

    if let Some(reply) = chat.ask(question, &sales).await {
        writeln!(out, "{}", reply)?;
    }
    Ok(())
}

pub async fn chat<R: BufRead, W: Write>(
    state: &AppState,
    filter: ReportFilter,
    input: &mut R,
    out: &mut W,
) -> AppResult<()> {
    let sales = context(state, filter, out)?;
    let mut chat = conversation(state)?;

    if let Some(greeting) = chat.messages().first() {
        writeln!(out, "{}", greeting.text)?;
    }

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if matches!(line.trim(), "salir" | "exit") {
            break;
        }

        if let Some(reply) = chat.ask(&line, &sales).await {
            writeln!(out, "{}", reply)?;
        }
    }
    Ok(())
}
