use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::{
    api::dtos::{
        ErrorResponse, ExtractRequest, MSG_BUSY, MSG_FETCH_FAILED, MSG_INVALID_URL,
        MSG_MALFORMED_URL, MSG_NO_CONTENT, SummaryResponse,
    },
    app_state::AppState,
    extractor::ExtractError,
    fetcher::FetchError,
    pipeline::PipelineError,
    summarizer::SummarizeError,
};

#[utoipa::path(
    post,
    path = "/api/extract",
    tag = "extract",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Summary and key points", body = SummaryResponse),
        (status = 400, description = "Invalid URL or no extractable content", body = ErrorResponse),
        (status = 502, description = "Page could not be fetched", body = ErrorResponse),
        (status = 503, description = "Too many concurrent requests", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
pub async fn extract_content(
    State(state): State<AppState>,
    Json(payload): Json<ExtractRequest>,
) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let url = payload.url.as_deref().unwrap_or_default().trim();

    match state.engine.process(url, state.key_points).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SummaryResponse {
                summary: result.summary,
                key_points: result.key_points,
            }),
        )
            .into_response(),
        Err(err) => error_response(url, err),
    }
}

/// Map a core failure kind to the stable transport contract.
fn error_response(url: &str, err: PipelineError) -> Response {
    let (status, message) = match &err {
        PipelineError::Fetch(FetchError::InvalidUrl(_)) => {
            (StatusCode::BAD_REQUEST, MSG_MALFORMED_URL.to_string())
        }
        PipelineError::Fetch(FetchError::UnsupportedScheme(_)) => {
            (StatusCode::BAD_REQUEST, MSG_INVALID_URL.to_string())
        }
        PipelineError::Fetch(_) => (StatusCode::BAD_GATEWAY, MSG_FETCH_FAILED.to_string()),
        PipelineError::Extract(ExtractError::NoContentFound)
        | PipelineError::Summarize(SummarizeError::EmptyInput) => {
            (StatusCode::BAD_REQUEST, MSG_NO_CONTENT.to_string())
        }
        PipelineError::Busy => (StatusCode::SERVICE_UNAVAILABLE, MSG_BUSY.to_string()),
        PipelineError::Summarize(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unexpected error: {other}"),
        ),
    };

    if status.is_server_error() {
        error!(%url, %err, status = status.as_u16(), "request failed");
    } else {
        warn!(%url, %err, status = status.as_u16(), "request rejected");
    }

    (status, Json(ErrorResponse { error: message })).into_response()
}
