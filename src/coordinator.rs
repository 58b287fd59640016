use crate::config::Configuration;
use crate::intake::{IntakeService, SubmissionServer};
use crate::store::{JsonFileStore, SubmissionStore};
use std::sync::Arc;
use tracing::{error, info};

/// Owns the running submission server and the store it writes to.
pub struct Coordinator {
    server_task: tokio::task::JoinHandle<()>,
    store: Arc<dyn SubmissionStore>,
}

impl Coordinator {
    fn new(configuration: &Configuration, store: Arc<dyn SubmissionStore>) -> Self {
        let service = IntakeService::new(store.clone());
        let server = SubmissionServer::new(configuration.port, service);
        let server_task = tokio::spawn(async move {
            if let Err(e) = server.start().await {
                error!("Submission server failed: {}", e);
            }
        });
        Self { server_task, store }
    }

    pub fn store(&self) -> Arc<dyn SubmissionStore> {
        self.store.clone()
    }

    /// Blocks until ctrl-c, then stops the listener.
    pub async fn run_until_shutdown(self) {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
        }
        self.stop();
    }

    pub fn stop(&self) {
        self.server_task.abort();
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    store: Option<Arc<dyn SubmissionStore>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            store: None,
        }
    }

    // Overrides the configured listen port.
    pub fn port(mut self, port: u16) -> Self {
        self.configuration.port = port;
        self
    }

    // Overrides the configured record file path.
    pub fn data_path(mut self, data_path: String) -> Self {
        self.configuration.data_path = data_path;
        self
    }

    // Swaps in a prebuilt store instead of the flat-file default.
    pub fn store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Coordinator {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(JsonFileStore::new(&self.configuration.data_path)));
        Coordinator::new(&self.configuration, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builder_wires_a_working_coordinator() {
        let coordinator = CoordinatorBuilder::new(Configuration::default())
            .port(0) // ephemeral port, the listener picks one
            .data_path(
                std::env::temp_dir()
                    .join("chromapoll-coordinator-test.json")
                    .to_string_lossy()
                    .into_owned(),
            )
            .build();
        coordinator.stop();
    }
}
