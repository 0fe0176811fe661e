use std::sync::Arc;

use crate::application::ports::security::{PasswordHasher, TokenManager};

/// The single configured admin account.
#[derive(Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub password_hash: String,
}

impl std::fmt::Debug for AdminIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminIdentity")
            .field("username", &self.username)
            .field("password_hash", &"[redacted]")
            .finish()
    }
}

pub struct AuthCommandService {
    pub(super) admin: AdminIdentity,
    pub(super) password_hasher: Arc<dyn PasswordHasher>,
    pub(super) token_manager: Arc<dyn TokenManager>,
}

impl AuthCommandService {
    pub fn new(
        admin: AdminIdentity,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
    ) -> Self {
        Self {
            admin,
            password_hasher,
            token_manager,
        }
    }
}
