// src/application/commands/posts/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{time::Clock, util::ContentSanitizer},
    },
    domain::post::{
        Post, PostContent, PostReadRepository, PostSlug, PostWriteRepository,
        services::PostSlugService,
    },
};

/// Writes that lose a slug race to a concurrent writer are re-resolved and
/// retried this many times in total before giving up with a conflict.
pub const MAX_SLUG_WRITE_ATTEMPTS: usize = 5;

pub struct PostCommandService {
    pub(super) write_repo: Arc<dyn PostWriteRepository>,
    pub(super) read_repo: Arc<dyn PostReadRepository>,
    pub(super) slug_service: Arc<PostSlugService>,
    pub(super) sanitizer: Arc<dyn ContentSanitizer>,
    pub(super) clock: Arc<dyn Clock>,
}

impl PostCommandService {
    pub fn new(
        write_repo: Arc<dyn PostWriteRepository>,
        read_repo: Arc<dyn PostReadRepository>,
        slug_service: Arc<PostSlugService>,
        sanitizer: Arc<dyn ContentSanitizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            sanitizer,
            clock,
        }
    }

    /// Validates and sanitizes untrusted editor output. Runs before any store access.
    pub(super) fn sanitize_content(&self, raw: &str) -> ApplicationResult<PostContent> {
        if raw.trim().is_empty() {
            return Err(ApplicationError::validation("content is required"));
        }
        let clean = self.sanitizer.sanitize(raw);
        PostContent::new(clean)
            .map_err(|_| ApplicationError::validation("content is empty after sanitization"))
    }

    pub(super) async fn find_post(&self, raw_slug: String) -> ApplicationResult<Post> {
        // A malformed slug can never be stored, so it is simply unknown.
        let slug =
            PostSlug::new(raw_slug).map_err(|_| ApplicationError::not_found("post not found"))?;
        self.read_repo
            .find_by_slug(&slug)
            .await?
            .ok_or_else(|| ApplicationError::not_found("post not found"))
    }

    pub(super) fn slug_retries_exhausted(slug: &PostSlug) -> ApplicationError {
        tracing::warn!(%slug, "giving up after repeated slug conflicts");
        ApplicationError::conflict("could not reserve a unique slug, please retry")
    }
}
