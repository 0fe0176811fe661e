// src/presentation/http/controllers/posts.rs
use crate::application::{
    commands::posts::{CreatePostCommand, DeletePostCommand, UpdatePostCommand},
    dto::{PostDto, PostListDto},
    queries::posts::GetPostBySlugQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Admin;
use crate::presentation::http::openapi::StatusResponse;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

/// Missing fields deserialize as empty so they surface as validation errors.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Post summaries, newest first.", body = PostListDto)
    ),
    tag = "Posts"
)]
pub async fn list_posts(Extension(state): Extension<HttpState>) -> HttpResult<Json<PostListDto>> {
    state
        .services
        .post_queries
        .list_posts()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post.", body = PostDto),
        (status = 404, description = "No post has this slug.", body = ErrorResponse)
    ),
    tag = "Posts"
)]
pub async fn get_post(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(GetPostBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created with a unique slug.", body = PostDto),
        (status = 400, description = "Invalid title or content.", body = ErrorResponse),
        (status = 401, description = "Admin token missing or invalid.", body = ErrorResponse),
        (status = 409, description = "Slug could not be reserved.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn create_post(
    Extension(state): Extension<HttpState>,
    Admin(admin): Admin,
    Json(payload): Json<CreatePostRequest>,
) -> HttpResult<(StatusCode, Json<PostDto>)> {
    let command = CreatePostCommand {
        title: payload.title,
        content: payload.content,
    };

    let post = state
        .services
        .post_commands
        .create_post(&admin, command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[utoipa::path(
    put,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Current post slug")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post; the slug moves when the title changes.", body = PostDto),
        (status = 400, description = "Invalid title or content.", body = ErrorResponse),
        (status = 401, description = "Admin token missing or invalid.", body = ErrorResponse),
        (status = 404, description = "No post has this slug.", body = ErrorResponse),
        (status = 409, description = "Concurrent modification or slug exhaustion.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn update_post(
    Extension(state): Extension<HttpState>,
    Admin(admin): Admin,
    Path(slug): Path<String>,
    Json(payload): Json<UpdatePostRequest>,
) -> HttpResult<Json<PostDto>> {
    let command = UpdatePostCommand {
        slug,
        title: payload.title,
        content: payload.content,
    };

    state
        .services
        .post_commands
        .update_post(&admin, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post deleted.", body = StatusResponse),
        (status = 401, description = "Admin token missing or invalid.", body = ErrorResponse),
        (status = 404, description = "No post has this slug.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn delete_post(
    Extension(state): Extension<HttpState>,
    Admin(admin): Admin,
    Path(slug): Path<String>,
) -> HttpResult<Json<StatusResponse>> {
    state
        .services
        .post_commands
        .delete_post(&admin, DeletePostCommand { slug })
        .await
        .into_http()?;

    Ok(Json(StatusResponse {
        status: "deleted".into(),
    }))
}
