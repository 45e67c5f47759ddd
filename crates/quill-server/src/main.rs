#![forbid(unsafe_code)]

use quill_server::{build_router, validate_startup_config, AppConfig, AppState};
use quill_store::DocumentStore;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config = AppConfig {
        bind_addr: env_str("QUILL_BIND_ADDR", "0.0.0.0:5000"),
        data_dir: PathBuf::from(env_str("QUILL_DATA_DIR", "data")),
        session_ttl: Duration::from_secs(env_u64("QUILL_SESSION_TTL_SECS", 24 * 60 * 60)),
    };
    validate_startup_config(&config).map_err(|e| format!("invalid config: {e}"))?;

    let store = Arc::new(DocumentStore::new(config.data_dir.clone()));
    store
        .ensure_layout()
        .map_err(|e| format!("data dir init failed: {e}"))?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::with_config(store, config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("quill-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
