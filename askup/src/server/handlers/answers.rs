use askup_shared::types::{Answer, NewAnswer};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::server::AppState;
use crate::server::session::acting_user;

#[derive(Debug, Deserialize)]
pub struct PostAnswerRequest {
    pub content: String,
}

/// Posts an answer. The question's existence is not checked.
pub async fn post_answer(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<PostAnswerRequest>,
) -> ApiResult<(StatusCode, Json<Answer>)> {
    let user_id = acting_user(&headers, &state.session_user_header)?;
    let question_id =
        Uuid::parse_str(&question_id).map_err(|_| ApiError::bad_request("Error posting answer"))?;

    let answer = state
        .answers
        .insert_answer(NewAnswer {
            content: request.content,
            question_id,
            user_id,
        })
        .await
        .map_err(|e| ApiError::internal("Error posting answer", e))?;

    info!(answer_id = %answer.id, %question_id, %user_id, "Answer posted");
    Ok((StatusCode::CREATED, Json(answer)))
}
