// src/application/commands/auth/mod.rs
mod login;
mod service;

pub use login::{LoginCommand, LoginResult};
pub use service::{AdminIdentity, AuthCommandService};
