// src/extract.rs

//! Pulls the generated text out of an upstream response.
//!
//! The completion API has returned its text in more than one place across
//! versions, so extraction is a list of JSON pointers tried in order. Adding a
//! new shape means adding a pointer here.

use serde_json::Value;

/// Known locations of the generated text, most preferred first.
pub const TEXT_POINTERS: &[&str] = &[
    // Convenience field aggregated by the Responses API.
    "/output_text",
    // Older SDK shape with a wrapped text object.
    "/output/0/content/0/text/value",
    // Current shape: first message item, first `output_text` part.
    "/output/0/content/0/text",
];

/// Returns the first non-empty string found at one of [`TEXT_POINTERS`].
pub fn extract_text(response: &Value) -> Option<&str> {
    TEXT_POINTERS.iter().find_map(|pointer| {
        let text = response.pointer(pointer)?.as_str()?;
        if text.is_empty() {
            return None;
        }
        tracing::debug!(pointer = %pointer, "Extracted answer text");
        Some(text)
    })
}
