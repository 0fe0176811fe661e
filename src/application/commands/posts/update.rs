use super::{MAX_SLUG_WRITE_ATTEMPTS, PostCommandService};
use crate::{
    application::{
        dto::{AuthenticatedAdmin, PostDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        post::{PostTitle, PostUpdate},
    },
};

pub struct UpdatePostCommand {
    /// Current slug of the post, taken from the request path.
    pub slug: String,
    pub title: String,
    pub content: String,
}

impl PostCommandService {
    pub async fn update_post(
        &self,
        actor: &AuthenticatedAdmin,
        command: UpdatePostCommand,
    ) -> ApplicationResult<PostDto> {
        let UpdatePostCommand {
            slug,
            title,
            content,
        } = command;
        let title = PostTitle::new(title)?;
        let content = self.sanitize_content(&content)?;

        let mut post = self.find_post(slug).await?;
        let original_updated_at = post.updated_at;
        let stored_slug = post.slug.clone();
        let title_changed = post.title_changed(&title);
        let now = self.clock.now();
        post.set_content(title.clone(), content, now);

        if !title_changed {
            let update = PostUpdate::from_edited(&post, original_updated_at, false);
            let updated = self.write_repo.update(update).await?;
            tracing::info!(admin = %actor.username, slug = %updated.slug, "post updated");
            return Ok(updated.into());
        }

        let candidate = self.slug_service.candidate(&title)?;
        for attempt in 1..=MAX_SLUG_WRITE_ATTEMPTS {
            let slug = self.slug_service.resolve(&candidate, Some(post.id)).await?;
            let slug_changed = slug != stored_slug;
            post.set_slug(slug.clone(), now);
            let update = PostUpdate::from_edited(&post, original_updated_at, slug_changed);

            match self.write_repo.update(update).await {
                Ok(updated) => {
                    tracing::info!(
                        admin = %actor.username,
                        from = %stored_slug,
                        to = %updated.slug,
                        "post updated with re-derived slug"
                    );
                    return Ok(updated.into());
                }
                Err(DomainError::SlugConflict(_)) => {
                    tracing::warn!(%slug, attempt, "slug claimed concurrently, resolving again");
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(Self::slug_retries_exhausted(&candidate))
    }
}
