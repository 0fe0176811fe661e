// tests/support/mocks/mod.rs
pub mod repos;
pub mod security;
pub mod time;

pub use repos::{CountingReadRepo, FailingRepo, RacingWriteRepo};
pub use security::{
    DummyPasswordHasher, DummyTokenManager, EXPIRED_TOKEN, TEST_PASSWORD, TEST_PASSWORD_HASH,
    TEST_TOKEN, TEST_USERNAME,
};
pub use time::{FixedClock, SteppingClock, fixed_now};
