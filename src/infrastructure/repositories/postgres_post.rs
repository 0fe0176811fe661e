// src/infrastructure/repositories/postgres_post.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    NewPost, Post, PostContent, PostId, PostReadRepository, PostSlug, PostSummary, PostTitle,
    PostUpdate, PostWriteRepository,
};
use crate::infrastructure::database::LazyPool;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

const POST_COLUMNS: &str = "id, title, slug, content, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresPostWriteRepository {
    pool: Arc<LazyPool>,
}

impl PostgresPostWriteRepository {
    pub fn new(pool: Arc<LazyPool>) -> Self {
        Self { pool }
    }

    async fn pool(&self) -> DomainResult<&PgPool> {
        self.pool.acquire().await.map_err(map_sqlx)
    }
}

#[derive(Clone)]
pub struct PostgresPostReadRepository {
    pool: Arc<LazyPool>,
}

impl PostgresPostReadRepository {
    pub fn new(pool: Arc<LazyPool>) -> Self {
        Self { pool }
    }

    async fn pool(&self) -> DomainResult<&PgPool> {
        self.pool.acquire().await.map_err(map_sqlx)
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Post {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            slug: PostSlug::new(row.slug)?,
            content: PostContent::new(row.content)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct PostSummaryRow {
    id: Uuid,
    title: String,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PostSummaryRow> for PostSummary {
    type Error = DomainError;

    fn try_from(row: PostSummaryRow) -> Result<Self, Self::Error> {
        Ok(PostSummary {
            id: PostId::new(row.id)?,
            title: PostTitle::new(row.title)?,
            slug: PostSlug::new(row.slug)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PostWriteRepository for PostgresPostWriteRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let NewPost {
            title,
            slug,
            content,
            created_at,
            updated_at,
        } = post;

        let sql = format!(
            "INSERT INTO posts (title, slug, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(title.as_str())
            .bind(slug.as_str())
            .bind(content.as_str())
            .bind(created_at)
            .bind(updated_at)
            .fetch_one(self.pool().await?)
            .await
            .map_err(map_sqlx)?;

        Post::try_from(row)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let PostUpdate {
            id,
            title,
            content,
            slug,
            original_updated_at,
            updated_at,
        } = update;
        let pool = self.pool().await?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(updated_at);
        builder.push(", title = ");
        builder.push_bind(title.into_inner());
        builder.push(", content = ");
        builder.push_bind(content.into_inner());

        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(slug.into_inner());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(Uuid::from(id));
        builder.push(" AND updated_at = ");
        builder.push_bind(original_updated_at);
        builder.push(" RETURNING ");
        builder.push(POST_COLUMNS);

        let maybe_row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(pool)
            .await
            .map_err(map_sqlx)?;

        match maybe_row {
            Some(row) => Post::try_from(row),
            None => {
                let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM posts WHERE id = $1")
                    .bind(Uuid::from(id))
                    .fetch_optional(pool)
                    .await
                    .map_err(map_sqlx)?;
                Err(match exists {
                    Some(_) => DomainError::Conflict(
                        "post was modified concurrently, please retry".into(),
                    ),
                    None => DomainError::NotFound("post not found".into()),
                })
            }
        }
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(Uuid::from(id))
            .execute(self.pool().await?)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("post not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostReadRepository for PostgresPostReadRepository {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug.as_str())
            .fetch_optional(self.pool().await?)
            .await
            .map_err(map_sqlx)?;

        row.map(Post::try_from).transpose()
    }

    async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>> {
        let rows = sqlx::query_as::<_, PostSummaryRow>(
            "SELECT id, title, slug, created_at, updated_at
             FROM posts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool().await?)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(PostSummary::try_from).collect()
    }
}
