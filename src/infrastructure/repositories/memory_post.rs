// src/infrastructure/repositories/memory_post.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::{
    NewPost, Post, PostId, PostReadRepository, PostSlug, PostSummary, PostUpdate,
    PostWriteRepository,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local store with the same uniqueness and concurrency guarantees as
/// the Postgres schema. Both repository traits are served by one instance.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, HashMap<PostId, Post>>> {
        self.posts
            .read()
            .map_err(|_| DomainError::Persistence("post store lock poisoned".into()))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, HashMap<PostId, Post>>> {
        self.posts
            .write()
            .map_err(|_| DomainError::Persistence("post store lock poisoned".into()))
    }
}

fn slug_taken(posts: &HashMap<PostId, Post>, slug: &PostSlug, except: Option<PostId>) -> bool {
    posts
        .values()
        .any(|post| post.slug == *slug && Some(post.id) != except)
}

#[async_trait]
impl PostWriteRepository for InMemoryPostRepository {
    async fn insert(&self, post: NewPost) -> DomainResult<Post> {
        let mut posts = self.write()?;
        if slug_taken(&posts, &post.slug, None) {
            return Err(DomainError::SlugConflict(post.slug.into_inner()));
        }

        let stored = Post {
            id: PostId::generate(),
            title: post.title,
            slug: post.slug,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at.max(post.created_at),
        };
        posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, update: PostUpdate) -> DomainResult<Post> {
        let mut posts = self.write()?;
        let current_updated_at = match posts.get(&update.id) {
            Some(post) => post.updated_at,
            None => return Err(DomainError::NotFound("post not found".into())),
        };
        if current_updated_at != update.original_updated_at {
            return Err(DomainError::Conflict(
                "post was modified concurrently, please retry".into(),
            ));
        }
        if let Some(slug) = &update.slug {
            if slug_taken(&posts, slug, Some(update.id)) {
                return Err(DomainError::SlugConflict(slug.to_string()));
            }
        }

        let post = posts
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("post not found".into()))?;
        post.title = update.title;
        post.content = update.content;
        if let Some(slug) = update.slug {
            post.slug = slug;
        }
        post.updated_at = update.updated_at.max(post.created_at);
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> DomainResult<()> {
        match self.write()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound("post not found".into())),
        }
    }
}

#[async_trait]
impl PostReadRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        Ok(self.read()?.values().find(|post| post.slug == *slug).cloned())
    }

    async fn list_summaries(&self) -> DomainResult<Vec<PostSummary>> {
        let mut summaries: Vec<PostSummary> = self.read()?.values().map(Post::summary).collect();
        summaries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(summaries)
    }
}
