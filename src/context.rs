//! Prompt augmentation for the RAG endpoint. The only context source is the
//! local wall clock, read fresh on every request.

use chrono::NaiveDateTime;

pub const RAG_INSTRUCTION: &str = "If the user's question can be answered by inferring from the provided context (for example, by converting time zones), you should do so. Keep your answer concise and only provide the final result, do not provide your inference details unless asked. Otherwise, reply: 'Sorry, I am unable to answer your question based on the provided context.'";

pub trait Clock: std::fmt::Debug + Send + Sync {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

pub fn time_context(now: NaiveDateTime, location: &str) -> String {
    format!(
        "The current local time is: {} in {}.",
        now.format("%Y-%m-%d %H:%M:%S"),
        location
    )
}

pub fn build_prompt(prompt: &str, context: &str, instruction: &str) -> String {
    format!("Context:\n{context}\n\nInstruction:\n{instruction}\n\nUser question:\n{prompt}")
}
