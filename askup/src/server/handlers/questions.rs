//! Front page, question pages, asking and searching.
use askup_repository::ItemStoreError;
use askup_shared::types::{NewQuestion, Question};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::author_name;
use crate::errors::{ApiError, ApiResult};
use crate::server::AppState;
use crate::server::session::acting_user;
use crate::server::views::{
    AnswerWithAuthor, QuestionList, QuestionPage, QuestionSummary, QuestionWithAuthor,
    SearchResults,
};

#[derive(Debug, Deserialize)]
pub struct AskQuestionRequest {
    pub title: String,
    pub content: String,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

async fn summarize(
    state: &AppState,
    questions: Vec<Question>,
) -> Result<Vec<QuestionSummary>, ItemStoreError> {
    let mut summaries = Vec::with_capacity(questions.len());
    for question in questions {
        let answer_count = state.answers.count_answers(question.id).await?;
        let username = author_name(state, question.user_id).await?;
        summaries.push(QuestionSummary {
            question,
            username,
            answer_count,
        });
    }
    Ok(summaries)
}

/// Most recent questions, newest first.
pub async fn index(State(state): State<AppState>) -> ApiResult<Json<QuestionList>> {
    let questions = state
        .questions
        .recent_questions(state.recent_questions_limit)
        .await
        .map_err(|e| ApiError::internal("An error occurred while loading questions", e))?;
    let questions = summarize(&state, questions)
        .await
        .map_err(|e| ApiError::internal("An error occurred while loading questions", e))?;

    Ok(Json(QuestionList { questions }))
}

pub async fn ask_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AskQuestionRequest>,
) -> ApiResult<(StatusCode, Json<Question>)> {
    let user_id = acting_user(&headers, &state.session_user_header)?;

    let question = state
        .questions
        .insert_question(NewQuestion::new(
            request.title,
            request.content,
            &request.tags,
            user_id,
        ))
        .await
        .map_err(|e| ApiError::internal("Error posting question", e))?;

    info!(question_id = %question.id, %user_id, "Question posted");
    Ok((StatusCode::CREATED, Json(question)))
}

/// A question with its author and its answers, highest tally first.
pub async fn view_question(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
) -> ApiResult<Json<QuestionPage>> {
    if question_id.trim().is_empty() {
        return Err(ApiError::bad_request("Question ID is required"));
    }
    let question_id =
        Uuid::parse_str(&question_id).map_err(|_| ApiError::bad_request("Invalid question ID"))?;

    load_question_page(&state, question_id)
        .await
        .map_err(|e| ApiError::internal("An error occurred while loading the question", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Question not found"))
}

async fn load_question_page(
    state: &AppState,
    question_id: Uuid,
) -> Result<Option<QuestionPage>, ItemStoreError> {
    let Some(question) = state.questions.find_question(question_id).await? else {
        return Ok(None);
    };
    let username = author_name(state, question.user_id).await?;

    let mut answers = Vec::new();
    for answer in state.answers.answers_for_question(question_id).await? {
        let username = author_name(state, answer.user_id).await?;
        answers.push(AnswerWithAuthor { answer, username });
    }

    Ok(Some(QuestionPage {
        question: QuestionWithAuthor { question, username },
        answers,
    }))
}

/// Questions whose title or content match `q`, or that carry `q` as a tag.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResults>> {
    let query = params.q.unwrap_or_default();
    if query.is_empty() {
        return Ok(Json(SearchResults {
            query,
            questions: Vec::new(),
        }));
    }

    let questions = match state.questions.search_questions(&query).await {
        Ok(questions) => questions,
        Err(ItemStoreError::InvalidQuery(_)) => {
            return Err(ApiError::bad_request("Invalid search query"));
        }
        Err(e) => return Err(ApiError::internal("An error occurred while searching", e)),
    };
    let questions = summarize(&state, questions)
        .await
        .map_err(|e| ApiError::internal("An error occurred while searching", e))?;

    Ok(Json(SearchResults { query, questions }))
}
