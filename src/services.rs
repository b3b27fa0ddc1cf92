// src/services.rs

use super::AppState;
use super::api::ReadingRequest;
use super::extract;
use super::prompt;
use super::upstream::UpstreamError;

/// Renders the prompt, makes the single upstream call and pulls out the answer.
///
/// A reply without recognizable text is not an error: the locale's sentinel
/// answer is returned instead.
pub async fn run_reading(state: &AppState, reading: &ReadingRequest) -> Result<String, UpstreamError> {
    // 1. Format the prompt
    let prompt = prompt::build_prompt(reading, state.locale);

    // 2. One call, no retry
    let response = state.client.complete(&state.model, &prompt).await?;

    // 3. Extract the answer
    match extract::extract_text(&response) {
        Some(text) => Ok(text.to_string()),
        None => {
            tracing::warn!(model = %state.model, "Completion response had no text in any known shape");
            Ok(state.locale.empty_answer().to_string())
        }
    }
}
