// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{
            auth::{AdminIdentity, AuthCommandService},
            posts::PostCommandService,
        },
        ports::{
            ClockPort, ContentSanitizerPort, PasswordHasherPort, SlugGeneratorPort,
            TokenManagerPort,
        },
        queries::posts::PostQueryService,
    },
    domain::post::{PostReadRepository, PostWriteRepository, services::PostSlugService},
};

pub struct ApplicationServices {
    pub post_commands: Arc<PostCommandService>,
    pub post_queries: Arc<PostQueryService>,
    pub auth_commands: Arc<AuthCommandService>,
    token_manager: Arc<TokenManagerPort>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        post_write_repo: Arc<dyn PostWriteRepository>,
        post_read_repo: Arc<dyn PostReadRepository>,
        admin: AdminIdentity,
        password_hasher: Arc<PasswordHasherPort>,
        token_manager: Arc<TokenManagerPort>,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
        sanitizer: Arc<ContentSanitizerPort>,
    ) -> Self {
        let slug_service = Arc::new(PostSlugService::new(
            Arc::clone(&post_read_repo),
            Arc::clone(&slugger),
        ));

        let post_commands = Arc::new(PostCommandService::new(
            Arc::clone(&post_write_repo),
            Arc::clone(&post_read_repo),
            Arc::clone(&slug_service),
            Arc::clone(&sanitizer),
            Arc::clone(&clock),
        ));

        let post_queries = Arc::new(PostQueryService::new(Arc::clone(&post_read_repo)));

        let auth_commands = Arc::new(AuthCommandService::new(
            admin,
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
        ));

        Self {
            post_commands,
            post_queries,
            auth_commands,
            token_manager,
        }
    }

    /// Resolve a raw bearer token into the admin fact the mutating endpoints require.
    pub async fn authenticate_admin(
        &self,
        token: &str,
    ) -> crate::application::ApplicationResult<crate::application::dto::AuthenticatedAdmin> {
        self.token_manager.authenticate(token).await
    }
}
