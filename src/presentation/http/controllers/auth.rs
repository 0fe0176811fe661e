// src/presentation/http/controllers/auth.rs
use crate::application::{commands::auth::LoginCommand, dto::AuthTokenDto};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin token issued.", body = AuthTokenDto),
        (status = 401, description = "Invalid credentials.", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<LoginRequest>,
) -> HttpResult<Json<AuthTokenDto>> {
    let command = LoginCommand {
        username: payload.username,
        password: payload.password,
    };

    let result = state
        .services
        .auth_commands
        .login(command)
        .await
        .into_http()?;

    Ok(Json(result.token))
}
