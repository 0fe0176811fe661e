// tests/support/mocks/repos.rs
use async_trait::async_trait;
use quillpost::domain::errors::{DomainError, DomainResult};
use quillpost::domain::post::{
    NewPost, Post, PostId, PostReadRepository, PostSlug, PostSummary, PostUpdate,
    PostWriteRepository,
};
use quillpost::infrastructure::repositories::InMemoryPostRepository;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Simulates a concurrent writer: the first `races` writes find their slug
/// claimed by another post between resolution and the write itself.
pub struct RacingWriteRepo {
    inner: Arc<InMemoryPostRepository>,
    races_left: AtomicUsize,
    writes: AtomicUsize,
}

impl RacingWriteRepo {
    pub fn new(inner: Arc<InMemoryPostRepository>, races: usize) -> Self {
        Self {
            inner,
            races_left: AtomicUsize::new(races),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn maybe_race(&self, slug: &PostSlug, template: &NewPost) -> DomainResult<()> {
        let raced = self
            .races_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if raced {
            let mut rival = template.clone();
            rival.slug = slug.clone();
            self.inner.insert(rival).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PostWriteRepository for RacingWriteRepo {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.maybe_race(&post.slug, &post).await?;
        self.inner.insert(post).await
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(slug) = &update.slug {
            let template = NewPost {
                title: update.title.clone(),
                slug: slug.clone(),
                content: update.content.clone(),
                created_at: update.updated_at,
                updated_at: update.updated_at,
            };
            self.maybe_race(slug, &template).await?;
        }
        self.inner.update(update).await
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        self.inner.delete(id).await
    }
}

/// Counts reads so tests can assert that rejected input never reached storage.
pub struct CountingReadRepo {
    inner: Arc<InMemoryPostRepository>,
    reads: AtomicUsize,
}

impl CountingReadRepo {
    pub fn new(inner: Arc<InMemoryPostRepository>) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostReadRepository for CountingReadRepo {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_slug(slug).await
    }

    async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_summaries().await
    }
}

/// Storage that is down: every call fails with a connection diagnostic.
#[derive(Clone, Debug, Default)]
pub struct FailingRepo;

const DIAGNOSTIC: &str = "connection refused: postgres://postgres:secret@db:5432";

#[async_trait]
impl PostWriteRepository for FailingRepo {
    async fn insert(&self, _post: NewPost) -> DomainResult<Post> {
        Err(DomainError::Persistence(DIAGNOSTIC.into()))
    }

    async fn update(&self, _update: PostUpdate) -> DomainResult<Post> {
        Err(DomainError::Persistence(DIAGNOSTIC.into()))
    }

    async fn delete(&self, _id: PostId) -> DomainResult<()> {
        Err(DomainError::Persistence(DIAGNOSTIC.into()))
    }
}

#[async_trait]
impl PostReadRepository for FailingRepo {
    async fn find_by_slug(&self, _slug: &PostSlug) -> DomainResult<Option<Post>> {
        Err(DomainError::Persistence(DIAGNOSTIC.into()))
    }

    async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>> {
        Err(DomainError::Persistence(DIAGNOSTIC.into()))
    }
}
