use crate::domain::errors::DomainError;

const CNT_POST_SLUG: &str = "posts_slug_key";
const CNT_POST_TIMESTAMPS: &str = "posts_updated_after_created_chk";
const CNT_POST_TITLE: &str = "posts_title_check";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_POST_SLUG => DomainError::SlugConflict("slug already exists".into()),
                    CNT_POST_TIMESTAMPS => {
                        DomainError::Validation("updated_at must not precede created_at".into())
                    }
                    CNT_POST_TITLE => {
                        DomainError::Validation("title length out of range".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut => DomainError::Persistence("database pool timed out".into()),
        _ => DomainError::Persistence(err.to_string()),
    }
}
