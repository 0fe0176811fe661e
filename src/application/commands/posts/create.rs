// src/application/commands/posts/create.rs
use super::{MAX_SLUG_WRITE_ATTEMPTS, PostCommandService};
use crate::{
    application::{
        dto::{AuthenticatedAdmin, PostDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        post::{NewPost, PostTitle},
    },
};

pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
}

impl CreatePostCommand {
    pub fn builder() -> CreatePostCommandBuilder {
        CreatePostCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreatePostCommandBuilder {
    title: Option<String>,
    content: Option<String>,
}

impl CreatePostCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn build(self) -> Result<CreatePostCommand, &'static str> {
        Ok(CreatePostCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.ok_or("content is required")?,
        })
    }
}

impl PostCommandService {
    pub async fn create_post(
        &self,
        actor: &AuthenticatedAdmin,
        command: CreatePostCommand,
    ) -> ApplicationResult<PostDto> {
        let title = PostTitle::new(command.title)?;
        let content = self.sanitize_content(&command.content)?;
        let candidate = self.slug_service.candidate(&title)?;
        let now = self.clock.now();

        for attempt in 1..=MAX_SLUG_WRITE_ATTEMPTS {
            let slug = self.slug_service.resolve(&candidate, None).await?;
            let new_post = NewPost {
                title: title.clone(),
                slug: slug.clone(),
                content: content.clone(),
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_post).await {
                Ok(created) => {
                    tracing::info!(admin = %actor.username, slug = %created.slug, id = %created.id, "post created");
                    return Ok(created.into());
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
