//! Sales assistant: prompt construction and the chat conversation

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use shared::Sale;

use crate::error::{AppError, AppResult};

/// First message of every conversation
pub const GREETING: &str =
    "¡Hola! Soy tu asistente de Boom Art. Pregúntame sobre tus ventas, utilidades o clientes.";

/// Reply used when the model answers with no text
pub const FALLBACK_EMPTY: &str = "Lo siento, no pude generar una respuesta.";

/// Reply used when the model cannot be reached
pub const FALLBACK_ERROR: &str = "Hubo un error al conectar con el asistente inteligente. Por favor verifica tu conexión o intenta más tarde.";

/// Default number of sales serialized into a prompt
pub const DEFAULT_CONTEXT_LIMIT: usize = 500;

/// Something that turns a prompt into a text reply
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// The first `limit` sales, in the order given
pub fn context_window(sales: &[Sale], limit: usize) -> &[Sale] {
    &sales[..limit.min(sales.len())]
}

/// Build the full prompt for one question
pub fn build_prompt(business: &str, question: &str, sales: &[Sale], limit: usize) -> AppResult<String> {
    let context = serde_json::to_string(context_window(sales, limit))?;

    Ok(format!(
        "You are a helpful data analyst assistant for \"{business}\", a 3D printing business.\n\
         Here is the raw JSON data of the recent sales:\n\
         {context}\n\
         \n\
         Rules:\n\
         1. Answer the user's question based strictly on this data.\n\
         2. If the answer requires calculation (sum, average, profit margin), perform it accurately.\n\
         3. Format currency in Soles (S/).\n\
         4. Be concise and professional.\n\
         5. If you can't find the answer in the data, say so.\n\
         \n\
         User Question: {question}\n"
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl Message {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// A chat session with the assistant.
///
/// Failures never leave the conversation: they become a fixed apology
/// message and the next question works as usual.
pub struct Conversation<M> {
    model: M,
    business: String,
    context_limit: usize,
    timeout: Duration,
    messages: Vec<Message>,
}

impl<M: LanguageModel> Conversation<M> {
    pub fn new(model: M, business: impl Into<String>, context_limit: usize, timeout: Duration) -> Self {
        Self {
            model,
            business: business.into(),
            context_limit,
            timeout,
            messages: vec![Message::new(Role::Assistant, GREETING)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Ask a question about `sales`; returns the reply, or `None` for a blank question
    pub async fn ask(&mut self, question: &str, sales: &[Sale]) -> Option<&str> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        self.messages.push(Message::new(Role::User, question));
        let reply = match self.generate(question, sales).await {
            Ok(text) if text.trim().is_empty() => FALLBACK_EMPTY.to_string(),
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Assistant error: {}", e);
                FALLBACK_ERROR.to_string()
            }
        };
        self.messages.push(Message::new(Role::Assistant, reply));

        self.messages.last().map(|m| m.text.as_str())
    }

    async fn generate(&self, question: &str, sales: &[Sale]) -> AppResult<String> {
        let prompt = build_prompt(&self.business, question, sales, self.context_limit)?;
        tracing::debug!(records = sales.len().min(self.context_limit), "Asking assistant");

        tokio::time::timeout(self.timeout, self.model.generate(&prompt))
            .await
            .map_err(|_| {
                AppError::Assistant(format!("no reply after {}s", self.timeout.as_secs()))
            })?
    }
}
