// src/application/ports/util.rs

/// Maps a title to a URL-safe base candidate. May return an empty string.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Strips unsafe markup from untrusted rich text. Must be idempotent.
pub trait ContentSanitizer: Send + Sync {
    fn sanitize(&self, raw: &str) -> String;
}
