// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedAdmin,
    error::{ApplicationError, ApplicationResult},
};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Extracts the admin identity from an authorized token's facts.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedAdmin> {
    let mut ctx = ClaimsContext::default();
    for fact in facts {
        ctx.apply(&fact.predicate);
    }

    let username = ctx
        .username
        .ok_or_else(|| ApplicationError::unauthorized("missing admin"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(AuthenticatedAdmin {
        username,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    username: Option<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
}

impl ClaimsContext {
    fn apply(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.first()) {
            ("admin", Some(Term::Str(name))) => self.username = Some(name.clone()),
            ("issued_at", Some(Term::Date(secs))) => self.issued_at = Some(date(*secs)),
            ("expires_at", Some(Term::Date(secs))) => self.expires_at = Some(date(*secs)),
            _ => {}
        }
    }
}

fn date(seconds: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(seconds)
}
