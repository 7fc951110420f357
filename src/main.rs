use std::net::SocketAddr;
use std::sync::Arc;

use jobboard_backend::{
    config::{init_config, LogFormat, StorageBackend},
    database::pool::{create_pool, run_migrations},
    router::build_router,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init_config()?;
    init_tracing(config.log_format);
    let shared = Arc::new(config.clone());

    let app_state = match config.storage_backend {
        StorageBackend::Postgres => {
            let pool = create_pool(config).await?;
            run_migrations(&pool).await?;
            info!("Connected to PostgreSQL, migrations applied");
            AppState::with_postgres(shared, pool)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            AppState::in_memory(shared)
        }
    };

    let app = build_router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
