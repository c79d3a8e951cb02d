use bowling_league::service::password::hash_password;
use bowling_league::{Config, LeagueError, LeagueState, league_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), LeagueError> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        insecure_cookie = cfg.insecure_cookie
    );

    let storage = bowling_league::db::connect(&cfg.database_url).await?;

    match cfg.admin_credentials() {
        Some((username, password)) => {
            let hashed = hash_password(password)?;
            storage.upsert_user(username, &hashed).await?;
            info!(username, "admin user provisioned");
        }
        None => {
            if storage.users().await?.is_empty() {
                warn!(
                    "no users registered; set BOWLING_ADMIN_USERNAME and BOWLING_ADMIN_PASSWORD to create one"
                );
            }
        }
    }

    let state = LeagueState::new(storage, &cfg);
    let app = league_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
