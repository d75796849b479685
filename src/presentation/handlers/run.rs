use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::FileLoaderError;
use crate::application::services::AnswerError;
use crate::domain::DocumentSource;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub documents: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RunResponse {
    pub answers: Vec<String>,
}

#[tracing::instrument(skip(state, request), fields(question_count = request.questions.len()))]
pub async fn run_handler(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Response {
    let source = match DocumentSource::from_url(&request.documents) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected document url");
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
        }
    };

    for (i, question) in request.questions.iter().enumerate() {
        tracing::debug!(
            question_number = i + 1,
            question = %sanitize_prompt(question),
            "Received question"
        );
    }

    match state
        .answer_service
        .answer_all(&source, &request.questions)
        .await
    {
        Ok(answers) => {
            tracing::info!(answers = answers.len(), "Run completed");
            (StatusCode::OK, Json(RunResponse { answers })).into_response()
        }
        Err(e) => {
            let (status, detail) = describe_failure(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Run failed");
            } else {
                tracing::warn!(error = %e, "Run rejected");
            }
            error_response(status, detail)
        }
    }
}

fn describe_failure(error: &AnswerError) -> (StatusCode, String) {
    match error {
        AnswerError::TooManyQuestions { max, .. } => (
            StatusCode::BAD_REQUEST,
            format!("Maximum {max} questions allowed per request"),
        ),
        AnswerError::Download(e) => (
            StatusCode::BAD_REQUEST,
            format!("Failed to download document: {e}"),
        ),
        AnswerError::NoChunks | AnswerError::Extraction(FileLoaderError::NoTextFound(_)) => (
            StatusCode::BAD_REQUEST,
            "No text chunks to process.".to_string(),
        ),
        AnswerError::Extraction(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to process PDF: {e}"),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Processing error: {other}"),
        ),
    }
}
