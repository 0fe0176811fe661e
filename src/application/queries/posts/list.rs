use super::PostQueryService;
use crate::application::{
    dto::{PostListDto, PostSummaryDto},
    error::ApplicationResult,
};

impl PostQueryService {
    pub async fn list_posts(&self) -> ApplicationResult<PostListDto> {
        let summaries = self.read_repo.list_summaries().await?;
        tracing::debug!(count = summaries.len(), "listed posts");
        Ok(PostListDto {
            posts: summaries.into_iter().map(PostSummaryDto::from).collect(),
        })
    }
}
