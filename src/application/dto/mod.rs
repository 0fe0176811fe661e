pub mod auth;
pub mod posts;
pub mod serde_time;

pub use auth::{AuthTokenDto, AuthenticatedAdmin, TokenSubject};
pub use posts::{PostDto, PostListDto, PostSummaryDto};
