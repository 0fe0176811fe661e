// src/bin/hash_admin_password.rs
use anyhow::{Context, Result, bail};
use std::env;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(password) = args.next() else {
        bail!("usage: hash_admin_password <password>");
    };
    if args.next().is_some() {
        bail!("usage: hash_admin_password <password> (quote passwords containing spaces)");
    }
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = quillpost::infrastructure::security::password::hash_password_blocking(&password)
        .context("failed to hash password")?;
    println!("ADMIN_PASSWORD_HASH={hash}");
    Ok(())
}
