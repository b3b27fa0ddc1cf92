// src/handlers.rs

use super::AppState;
use super::api::{ReadingRequest, ReadingResponse, TarotRequest};
use super::error::ServiceError;
use super::services;
use actix_web::{HttpResponse, Responder, post, web};

/* ---------- POST /api/tarot ---------- */
#[post("/api/tarot")]
pub async fn tarot(
    state: web::Data<AppState>,
    body: web::Json<TarotRequest>,
) -> Result<impl Responder, ServiceError> {
    let reading = ReadingRequest::try_from(body.into_inner())?;
    tracing::debug!(
        question_chars = reading.question.chars().count(),
        cards = reading.cards.len(),
        "Received reading request"
    );

    // Upstream failures are reported in the body with a 200 status.
    let response = match services::run_reading(&state, &reading).await {
        Ok(answer) => ReadingResponse::answer(answer),
        Err(e) => {
            tracing::error!(error = %e, details = ?e, "OpenAI API call failed");
            ReadingResponse::failure(e.client_message(state.locale.upstream_failure()))
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Body parsing errors get the same `{"error": ...}` shape as validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ServiceError::MalformedBody(err.to_string()).into())
}

/// Registers the API routes. Static files are mounted separately, after this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(tarot);
}
