// tests/support/builders.rs
use std::sync::Arc;

use quillpost::application::{
    commands::auth::AdminIdentity,
    dto::AuthenticatedAdmin,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
    },
    services::ApplicationServices,
};
use quillpost::domain::post::{PostReadRepository, PostWriteRepository};
use quillpost::infrastructure::{
    repositories::InMemoryPostRepository, sanitizer::AmmoniaContentSanitizer,
    util::DefaultSlugGenerator,
};

use super::mocks::{
    DummyPasswordHasher, DummyTokenManager, SteppingClock, TEST_PASSWORD_HASH, TEST_USERNAME,
    fixed_now,
};

/// Wires `ApplicationServices` with the production slugger and sanitizer and
/// test doubles everywhere else. Storage defaults to one shared in-memory store.
pub struct ServicesBuilder {
    write_repo: Arc<dyn PostWriteRepository>,
    read_repo: Arc<dyn PostReadRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_manager: Arc<dyn TokenManager>,
    clock: Arc<dyn Clock>,
    admin: AdminIdentity,
}

impl ServicesBuilder {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryPostRepository::new()))
    }

    pub fn with_store(store: Arc<InMemoryPostRepository>) -> Self {
        Self {
            write_repo: store.clone(),
            read_repo: store,
            password_hasher: Arc::new(DummyPasswordHasher),
            token_manager: Arc::new(DummyTokenManager),
            clock: Arc::new(SteppingClock::default()),
            admin: AdminIdentity {
                username: TEST_USERNAME.into(),
                password_hash: TEST_PASSWORD_HASH.into(),
            },
        }
    }

    pub fn write_repo(mut self, repo: Arc<dyn PostWriteRepository>) -> Self {
        self.write_repo = repo;
        self
    }

    pub fn read_repo(mut self, repo: Arc<dyn PostReadRepository>) -> Self {
        self.read_repo = repo;
        self
    }

    pub fn password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.password_hasher = hasher;
        self
    }

    pub fn token_manager(mut self, manager: Arc<dyn TokenManager>) -> Self {
        self.token_manager = manager;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn admin(mut self, username: &str, password_hash: &str) -> Self {
        self.admin = AdminIdentity {
            username: username.into(),
            password_hash: password_hash.into(),
        };
        self
    }

    pub fn build(self) -> Arc<ApplicationServices> {
        Arc::new(ApplicationServices::new(
            self.write_repo,
            self.read_repo,
            self.admin,
            self.password_hasher,
            self.token_manager,
            self.clock,
            Arc::new(DefaultSlugGenerator),
            Arc::new(AmmoniaContentSanitizer::new()),
        ))
    }
}

impl Default for ServicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn test_admin() -> AuthenticatedAdmin {
    AuthenticatedAdmin {
        username: TEST_USERNAME.into(),
        issued_at: fixed_now(),
        expires_at: fixed_now() + chrono::Duration::hours(1),
    }
}
