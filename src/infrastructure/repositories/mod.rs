// src/infrastructure/repositories/mod.rs
mod error;
mod memory_post;
mod postgres_post;

pub use error::map_sqlx;
pub use memory_post::InMemoryPostRepository;
pub use postgres_post::{PostgresPostReadRepository, PostgresPostWriteRepository};
