use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use stele::application::{ports::time::Clock, services::ApplicationServices};
use stele::config::AppConfig;
use stele::domain::{
    article::{ArticleReadRepository, ArticleVersionRepository, ArticleWriteRepository},
    theme::ThemeRepository,
};
use stele::infrastructure::{
    database,
    repositories::{
        PostgresArticleRepository, PostgresArticleVersionRepository, PostgresThemeRepository,
    },
    time::SystemClock,
};
use stele::presentation::http::{routes::build_router, state::HttpState};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let article_repo = PostgresArticleRepository::new(pool.clone());
    let article_write_repo: Arc<dyn ArticleWriteRepository> = Arc::new(article_repo.clone());
    let article_read_repo: Arc<dyn ArticleReadRepository> = Arc::new(article_repo);
    let article_version_repo: Arc<dyn ArticleVersionRepository> =
        Arc::new(PostgresArticleVersionRepository::new(pool.clone()));
    let theme_repo: Arc<dyn ThemeRepository> = Arc::new(PostgresThemeRepository::new(pool));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        article_version_repo,
        theme_repo,
        clock,
    ));

    let state = HttpState { services };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
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
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
