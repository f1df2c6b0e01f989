use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use whitelist_portal::config::get_configuration;
use whitelist_portal::services::database::Database;
use whitelist_portal::services::rcon::RconSink;
use whitelist_portal::services::sync::{self, CommandSink, LogSink};
use whitelist_portal::startup::build_router;
use whitelist_portal::{auth, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        if command == "hash-password" {
            let password = args
                .next()
                .context("usage: whitelist-portal hash-password <password>")?;
            let hash = auth::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("hashing failed: {e}"))?;
            println!("{hash}");
            println!("Paste this into admin.password_hash in config/base.yaml");
            return Ok(());
        }
        anyhow::bail!("unknown command: {command}");
    }

    init_tracing();

    let settings = get_configuration().context("failed to read configuration")?;

    let pool = db::create_pool(&settings.database)
        .await
        .context("failed to open database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;
    let database = Database::new(pool);

    let sink: Arc<dyn CommandSink> = if settings.rcon.enabled {
        Arc::new(RconSink::new(settings.rcon.clone()))
    } else {
        info!("RCON disabled; whitelist commands will only be logged");
        Arc::new(LogSink)
    };
    let (sync_handle, _sync_worker) = sync::spawn(sink);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let state = AppState::new(database, sync_handle, Arc::new(settings));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;
    info!("whitelist portal listening on {address}");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
