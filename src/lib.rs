// src/lib.rs

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logging;
pub mod prompt;
pub mod services;
pub mod upstream;

use prompt::PromptLocale;
use std::sync::Arc;
use upstream::CompletionClient;

/* ---------- Shared State ---------- */

/// Read-only state handed to every worker. Nothing in here changes after startup.
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub model: String,
    pub locale: PromptLocale,
}
