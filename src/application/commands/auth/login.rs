use super::AuthCommandService;
use crate::application::{
    dto::{AuthTokenDto, TokenSubject},
    error::{ApplicationError, ApplicationResult},
};

pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginResult {
    pub token: AuthTokenDto,
    pub username: String,
}

impl AuthCommandService {
    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginResult> {
        let username_matches = command.username == self.admin.username;

        // Verify even on a username mismatch so both failures cost the same.
        let verified = self
            .password_hasher
            .verify(&command.password, &self.admin.password_hash)
            .await;

        match verified {
            Ok(()) if username_matches => {}
            Err(ApplicationError::Infrastructure(msg)) => {
                return Err(ApplicationError::Infrastructure(msg));
            }
            _ => {
                tracing::warn!(username = %command.username, "rejected admin login");
                return Err(ApplicationError::unauthorized("invalid credentials"));
            }
        }

        let token = self
            .token_manager
            .issue(TokenSubject {
                username: self.admin.username.clone(),
            })
            .await?;
        tracing::info!(username = %self.admin.username, "admin logged in");

        Ok(LoginResult {
            token,
            username: self.admin.username.clone(),
        })
    }
}
