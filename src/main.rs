use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::{ConfigLoader, ServerSettings};
use attendance_engine::models::Period;
use attendance_engine::session::Session;
use attendance_engine::store::{JsonFileRecordStore, JsonLinesBackupSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ServerSettings::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Server starting...");

    let config = ConfigLoader::load(&settings.policy_path).with_context(|| {
        format!(
            "failed to load attendance policy from {}",
            settings.policy_path.display()
        )
    })?;
    info!(policy = %config.policy().name, "Policy loaded");

    let session = Session::new(
        config.policy().clone(),
        Period::current(),
        Box::new(JsonFileRecordStore::new(&settings.store_path)),
        Box::new(JsonLinesBackupSink::new(&settings.backup_path)),
    );
    info!(
        store = %settings.store_path.display(),
        backup = %settings.backup_path.display(),
        "Record sinks configured"
    );

    let router = create_router(AppState::new(config, session));

    let listener = TcpListener::bind(&settings.addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.addr))?;
    info!(addr = %settings.addr, "Listening");

    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
