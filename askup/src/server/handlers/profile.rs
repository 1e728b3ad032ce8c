use askup_repository::ItemStoreError;
use askup_shared::types::User;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::errors::{ApiError, ApiResult};
use crate::server::AppState;
use crate::server::views::{ProfileAnswer, ProfilePage, UNKNOWN_QUESTION};

/// A user's questions and answers, newest first.
pub async fn profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ProfilePage>> {
    let user = state
        .users
        .find_user_by_username(&username)
        .await
        .map_err(|e| ApiError::internal("An error occurred while loading the profile", e))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    load_profile(&state, user)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("An error occurred while loading the profile", e))
}

async fn load_profile(state: &AppState, user: User) -> Result<ProfilePage, ItemStoreError> {
    let questions = state.questions.questions_by_user(user.id).await?;

    let mut answers = Vec::new();
    for answer in state.answers.answers_by_user(user.id).await? {
        let question_title = state
            .questions
            .find_question(answer.question_id)
            .await?
            .map(|question| question.title)
            .unwrap_or_else(|| UNKNOWN_QUESTION.to_string());
        answers.push(ProfileAnswer {
            answer,
            question_title,
        });
    }

    Ok(ProfilePage {
        user: user.into(),
        questions,
        answers,
    })
}
