// src/domain/post/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::repository::PostReadRepository;
use crate::domain::post::value_objects::{PostId, PostSlug, PostTitle};

/// Base used when a title normalizes to nothing (e.g. `"!!!"`).
pub const FALLBACK_SLUG_BASE: &str = "untitled";

/// Upper bound on disambiguator attempts. Reaching it means the slug space for
/// one base is corrupted, not that the blog is busy.
pub const MAX_SUFFIX_ATTEMPTS: u64 = 10_000;

/// Domain service responsible for producing unique slugs for posts.
pub struct PostSlugService {
    read_repo: Arc<dyn PostReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl PostSlugService {
    pub fn new(read_repo: Arc<dyn PostReadRepository>, generator: Arc<dyn SlugGenerator>) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Base candidate for `title`, before any collision handling.
    pub fn candidate(&self, title: &PostTitle) -> DomainResult<PostSlug> {
        let base = self.generator.slugify(title.as_str());
        if base.is_empty() {
            PostSlug::new(FALLBACK_SLUG_BASE)
        } else {
            PostSlug::new(base)
        }
    }

    pub async fn generate_unique_slug(
        &self,
        title: &PostTitle,
        ignore_id: Option<PostId>,
    ) -> DomainResult<PostSlug> {
        let candidate = self.candidate(title)?;
        self.resolve(&candidate, ignore_id).await
    }

    /// Returns `candidate` when free (or held by `ignore_id`), otherwise the
    /// first free `candidate-N` for N = 1, 2, ...
    pub async fn resolve(
        &self,
        candidate: &PostSlug,
        ignore_id: Option<PostId>,
    ) -> DomainResult<PostSlug> {
        if self.is_available(candidate, ignore_id).await? {
            return Ok(candidate.clone());
        }

        for counter in 1..=MAX_SUFFIX_ATTEMPTS {
            let attempt = candidate.with_suffix(counter);
            if self.is_available(&attempt, ignore_id).await? {
                return Ok(attempt);
            }
        }

        tracing::error!(base = %candidate, "no free slug suffix found");
        Err(DomainError::Persistence(format!(
            "exhausted {MAX_SUFFIX_ATTEMPTS} slug suffixes for `{candidate}`"
        )))
    }

    async fn is_available(&self, slug: &PostSlug, ignore_id: Option<PostId>) -> DomainResult<bool> {
        match self.read_repo.find_by_slug(slug).await? {
            Some(existing) => Ok(ignore_id == Some(existing.id)),
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::post::{Post, PostContent, PostSummary};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;

    struct LowercaseSlugger;

    impl SlugGenerator for LowercaseSlugger {
        fn slugify(&self, input: &str) -> String {
            input
                .to_lowercase()
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("-")
        }
    }

    struct FixedRepo {
        posts: HashMap<String, Post>,
        occupy_everything: Option<PostId>,
    }

    impl FixedRepo {
        fn with(slugs: &[(&str, PostId)]) -> Self {
            let posts = slugs
                .iter()
                .map(|(slug, id)| ((*slug).to_string(), post(slug, *id)))
                .collect();
            Self {
                posts,
                occupy_everything: None,
            }
        }
    }

    fn post(slug: &str, id: PostId) -> Post {
        let now = Utc::now();
        Post {
            id,
            title: PostTitle::new(slug).unwrap(),
            slug: PostSlug::new(slug).unwrap(),
            content: PostContent::new("<p>x</p>").unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait]
    impl PostReadRepository for FixedRepo {
        async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
            if let Some(owner) = self.occupy_everything {
                return Ok(Some(post(slug.as_str(), owner)));
            }
            Ok(self.posts.get(slug.as_str()).cloned())
        }

        async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>> {
            Ok(self.posts.values().map(Post::summary).collect())
        }
    }

    fn service(repo: FixedRepo) -> PostSlugService {
        PostSlugService::new(Arc::new(repo), Arc::new(LowercaseSlugger))
    }

    fn title(value: &str) -> PostTitle {
        PostTitle::new(value).unwrap()
    }

    #[tokio::test]
    async fn free_candidate_is_returned_unchanged() {
        let svc = service(FixedRepo::with(&[]));
        let slug = svc.generate_unique_slug(&title("Hello World"), None).await.unwrap();
        assert_eq!(slug.as_str(), "hello-world");
    }

    #[tokio::test]
    async fn suffixes_are_derived_from_the_base_candidate() {
        let svc = service(FixedRepo::with(&[
            ("hello-world", PostId::generate()),
            ("hello-world-1", PostId::generate()),
        ]));
        let slug = svc.generate_unique_slug(&title("Hello World"), None).await.unwrap();
        assert_eq!(slug.as_str(), "hello-world-2");
    }

    #[tokio::test]
    async fn smallest_free_suffix_wins() {
        let svc = service(FixedRepo::with(&[
            ("hello-world", PostId::generate()),
            ("hello-world-2", PostId::generate()),
        ]));
        let slug = svc.generate_unique_slug(&title("Hello World"), None).await.unwrap();
        assert_eq!(slug.as_str(), "hello-world-1");
    }

    #[tokio::test]
    async fn excluded_post_keeps_its_slug() {
        let own = PostId::generate();
        let svc = service(FixedRepo::with(&[("hello-world", own)]));
        let slug = svc
            .generate_unique_slug(&title("Hello World"), Some(own))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "hello-world");
    }

    #[tokio::test]
    async fn excluded_post_can_reclaim_a_suffixed_slot() {
        let own = PostId::generate();
        let svc = service(FixedRepo::with(&[
            ("hello-world", PostId::generate()),
            ("hello-world-1", own),
        ]));
        let slug = svc
            .generate_unique_slug(&title("Hello World"), Some(own))
            .await
            .unwrap();
        assert_eq!(slug.as_str(), "hello-world-1");
    }

    #[tokio::test]
    async fn empty_candidate_falls_back_to_placeholder() {
        let svc = service(FixedRepo::with(&[("untitled", PostId::generate())]));
        let slug = svc.generate_unique_slug(&title("!!!"), None).await.unwrap();
        assert_eq!(slug.as_str(), "untitled-1");
    }

    #[tokio::test]
    async fn exhausted_suffixes_surface_as_persistence_error() {
        let mut repo = FixedRepo::with(&[]);
        repo.occupy_everything = Some(PostId::generate());
        let svc = service(repo);
        let err = svc
            .generate_unique_slug(&title("Hello"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
