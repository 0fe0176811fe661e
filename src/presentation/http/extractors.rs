// src/presentation/http/extractors.rs
use crate::{
    application::{dto::AuthenticatedAdmin, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{Extension, extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};

use super::error::HttpError;

/// Rejects the request with 401 unless it carries a valid admin bearer token.
#[derive(Debug, Clone)]
pub struct Admin(pub AuthenticatedAdmin);

impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::infrastructure(
                    "application state missing",
                ))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::unauthorized(
                    "missing Authorization header",
                ))
            })?;

        let admin = app_state
            .services
            .authenticate_admin(header.token())
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthorized(reason) => {
                    tracing::debug!(%reason, "rejected bearer token");
                    HttpError::from_error(ApplicationError::unauthorized(
                        "invalid or expired token",
                    ))
                }
                other => HttpError::from_error(other),
            })?;

        Ok(Self(admin))
    }
}
