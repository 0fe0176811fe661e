// src/application/commands/posts/delete.rs
use super::PostCommandService;
use crate::application::{dto::AuthenticatedAdmin, error::ApplicationResult};

pub struct DeletePostCommand {
    pub slug: String,
}

impl PostCommandService {
    pub async fn delete_post(
        &self,
        actor: &AuthenticatedAdmin,
        command: DeletePostCommand,
    ) -> ApplicationResult<()> {
        let post = self.find_post(command.slug).await?;
        self.write_repo.delete(post.id).await?;
        tracing::info!(admin = %actor.username, slug = %post.slug, "post deleted");
        Ok(())
    }
}
