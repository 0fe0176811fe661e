// src/domain/post/entity.rs
use crate::domain::post::value_objects::{PostContent, PostId, PostSlug, PostTitle};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn set_content(&mut self, title: PostTitle, content: PostContent, now: DateTime<Utc>) {
        self.title = title;
        self.content = content;
        self.touch(now);
    }

    pub fn set_slug(&mut self, slug: PostSlug, now: DateTime<Utc>) {
        self.slug = slug;
        self.touch(now);
    }

    /// Whether `title` differs from the stored one, i.e. the slug must be re-derived.
    pub fn title_changed(&self, title: &PostTitle) -> bool {
        self.title != *title
    }

    // updated_at never falls behind created_at, even with a skewed clock.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    pub fn summary(&self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Listing projection; carries everything but the content.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: PostId,
    pub title: PostTitle,
    pub slug: PostSlug,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub slug: PostSlug,
    pub content: PostContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub slug: Option<PostSlug>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    /// Snapshot of `post` after in-memory edits. `original_updated_at` guards
    /// against concurrent writers.
    pub fn from_edited(
        post: &Post,
        original_updated_at: DateTime<Utc>,
        slug_changed: bool,
    ) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            slug: slug_changed.then(|| post.slug.clone()),
            original_updated_at,
            updated_at: post.updated_at,
        }
    }
}
