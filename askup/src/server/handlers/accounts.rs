//! Registration and login.
//!
//! Both return the user id for the session layer to store; this service
//! never issues cookies. Logging out is the session layer dropping that id.
use askup_repository::ItemStoreError;
use askup_shared::types::NewUser;
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

use crate::errors::{ApiError, ApiResult};
use crate::server::AppState;
use crate::server::passwords::{hash_password, verify_password};
use crate::server::views::SessionUser;

const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionUser>)> {
    let RegisterRequest {
        username,
        email,
        password,
    } = request;
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::bad_request(
            "Username, email and password are required",
        ));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(REGISTRATION_FAILED, e))?
        .map_err(|e| ApiError::internal(REGISTRATION_FAILED, e))?;

    let user = match state
        .users
        .insert_user(NewUser {
            username,
            email,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(ItemStoreError::Duplicate(_)) => {
            return Err(ApiError::conflict("Username or email already exists"));
        }
        Err(e) => return Err(ApiError::internal(REGISTRATION_FAILED, e)),
    };

    info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<SessionUser>> {
    let credentials = state
        .users
        .find_credentials(&request.username)
        .await
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?
        .ok_or(ApiError::InvalidCredentials)?;

    let password = request.password;
    let stored_hash = credentials.password_hash;
    let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::internal(LOGIN_FAILED, e))?;
    if !verified {
        return Err(ApiError::InvalidCredentials);
    }

    info!(user_id = %credentials.user.id, "User logged in");
    Ok(Json(credentials.user.into()))
}
