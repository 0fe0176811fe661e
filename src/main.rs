use anyhow::Result;
use quillpost::application::{
    commands::auth::AdminIdentity,
    ports::{
        security::{PasswordHasher, TokenManager},
        time::Clock,
        util::{ContentSanitizer, SlugGenerator},
    },
    services::ApplicationServices,
};
use quillpost::config::{AppConfig, StorageBackend};
use quillpost::domain::post::{PostReadRepository, PostWriteRepository};
use quillpost::infrastructure::{
    database::{self, LazyPool},
    repositories::{
        InMemoryPostRepository, PostgresPostReadRepository, PostgresPostWriteRepository,
    },
    sanitizer::AmmoniaContentSanitizer,
    security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use quillpost::presentation::http::{routes::build_router, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let (post_write_repo, post_read_repo) = build_repositories(&config).await?;

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let sanitizer: Arc<dyn ContentSanitizer> = Arc::new(AmmoniaContentSanitizer::new());
    let admin = AdminIdentity {
        username: config.admin_username().to_string(),
        password_hash: config.admin_password_hash().to_string(),
    };

    let services = Arc::new(ApplicationServices::new(
        post_write_repo,
        post_read_repo,
        admin,
        password_hasher,
        token_manager,
        clock,
        slugger,
        sanitizer,
    ));

    let app = build_router(HttpState { services }, config.allowed_origins());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_repositories(
    config: &AppConfig,
) -> Result<(Arc<dyn PostWriteRepository>, Arc<dyn PostReadRepository>)> {
    match config.storage_backend() {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; posts are lost on restart");
            let repo = Arc::new(InMemoryPostRepository::new());
            let write: Arc<dyn PostWriteRepository> = repo.clone();
            let read: Arc<dyn PostReadRepository> = repo;
            Ok((write, read))
        }
        StorageBackend::Postgres => {
            let pool = Arc::new(LazyPool::new(
                config.database_url(),
                config.database_max_connections(),
                config.database_acquire_timeout(),
            ));
            // Migrations force the first connection; request handlers reuse it.
            database::run_migrations(pool.acquire().await?).await?;
            tracing::info!("database migrations applied");
            let write: Arc<dyn PostWriteRepository> =
                Arc::new(PostgresPostWriteRepository::new(Arc::clone(&pool)));
            let read: Arc<dyn PostReadRepository> = Arc::new(PostgresPostReadRepository::new(pool));
            Ok((write, read))
        }
    }
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
