use crate::domain::errors::DomainResult;
use crate::domain::post::entity::{NewPost, Post, PostSummary, PostUpdate};
use crate::domain::post::value_objects::{PostId, PostSlug};
use async_trait::async_trait;

#[async_trait]
pub trait PostWriteRepository: Send + Sync {
    /// Fails with `DomainError::SlugConflict` when the slug is already taken.
    async fn insert(&self, post: NewPost) -> DomainResult<Post>;
    /// Fails with `DomainError::SlugConflict` on a taken slug and with
    /// `DomainError::Conflict` when the record changed since `original_updated_at`.
    async fn update(&self, update: PostUpdate) -> DomainResult<Post>;
    async fn delete(&self, id: PostId) -> DomainResult<()>;
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    /// Newest-created first.
    async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>>;
}
