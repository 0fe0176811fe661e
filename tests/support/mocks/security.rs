// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use quillpost::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedAdmin, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};

pub const TEST_TOKEN: &str = "test-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct-password";
pub const TEST_PASSWORD_HASH: &str = "hashed:correct-password";

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        Ok(AuthTokenDto {
            token: TEST_TOKEN.into(),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedAdmin> {
        let now = super::time::fixed_now();
        match token {
            TEST_TOKEN => Ok(AuthenticatedAdmin {
                username: TEST_USERNAME.into(),
                issued_at: now,
                expires_at: now + Duration::hours(1),
            }),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

/// Plain-text "hashing": `hashed:<password>`.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        match expected_hash.strip_prefix("hashed:") {
            Some(expected) if expected == password => Ok(()),
            Some(_) => Err(ApplicationError::unauthorized("invalid credentials")),
            None => Err(ApplicationError::infrastructure("malformed hash")),
        }
    }
}
