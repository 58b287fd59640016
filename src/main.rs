use chromapoll::analysis::AnalysisRunner;
use chromapoll::config::Configuration;
use chromapoll::coordinator::CoordinatorBuilder;
use chromapoll::error::{AppError, StoreError};
use chromapoll::store::JsonFileStore;
use std::sync::Arc;
use tracing::{info, Level};

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    init_logging();
    let configuration = Configuration::load()?;

    match std::env::args().nth(1).as_deref() {
        Some("analyze") => analyze(&configuration).await,
        _ => serve(configuration).await,
    }
}

async fn serve(configuration: Configuration) -> Result<(), AppError> {
    info!("Collecting submissions into {}", configuration.data_path);
    let coordinator = CoordinatorBuilder::new(configuration).build();
    coordinator.run_until_shutdown().await;
    Ok(())
}

async fn analyze(configuration: &Configuration) -> Result<(), AppError> {
    let store = Arc::new(JsonFileStore::new(&configuration.data_path));
    let report = AnalysisRunner::new(store).run().await?;
    let rendered = serde_json::to_string_pretty(&report).map_err(StoreError::Serialize)?;
    println!("{rendered}");
    Ok(())
}
