//! Fire-and-forget synchronization with the live server whitelist.
//!
//! Commands are queued on an unbounded channel and delivered by a single
//! background worker, so HTTP responses never wait on (or observe) the
//! game server. Failed deliveries are retried a bounded number of times
//! and then dead-lettered to the log.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::AppError;

const DELIVERY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Narrow interface to whatever access-control mechanism the deployment
/// target exposes.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn add(&self, name: &str) -> Result<(), AppError>;
    async fn remove(&self, name: &str) -> Result<(), AppError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncCommand {
    Add(String),
    Remove(String),
}

/// Producer half of the sync queue. Cloned into every service that mutates
/// the whitelist.
#[derive(Clone)]
pub struct SyncHandle {
    tx: mpsc::UnboundedSender<SyncCommand>,
}

impl SyncHandle {
    pub fn dispatch_add(&self, name: &str) {
        self.dispatch(SyncCommand::Add(name.to_string()));
    }

    pub fn dispatch_remove(&self, name: &str) {
        self.dispatch(SyncCommand::Remove(name.to_string()));
    }

    fn dispatch(&self, command: SyncCommand) {
        if self.tx.send(command.clone()).is_err() {
            tracing::error!(?command, "sync worker is gone, command dropped");
        }
    }
}

/// Spawn the delivery worker. The worker drains the queue in order and
/// exits once every handle has been dropped.
pub fn spawn(sink: Arc<dyn CommandSink>) -> (SyncHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            deliver(sink.as_ref(), command).await;
        }
    });
    (SyncHandle { tx }, worker)
}

async fn deliver(sink: &dyn CommandSink, command: SyncCommand) {
    for attempt in 1..=DELIVERY_ATTEMPTS {
        let result = match &command {
            SyncCommand::Add(name) => sink.add(name).await,
            SyncCommand::Remove(name) => sink.remove(name).await,
        };
        match result {
            Ok(()) => {
                tracing::info!(?command, "whitelist command delivered");
                return;
            }
            Err(e) => {
                tracing::warn!(?command, attempt, "whitelist command failed: {e}");
                if attempt < DELIVERY_ATTEMPTS {
                    tokio::time::sleep(RETRY_DELAY * attempt).await;
                }
            }
        }
    }
    tracing::error!(?command, "giving up on whitelist command after {DELIVERY_ATTEMPTS} attempts");
}

/// Log-only sink for deployments without RCON configured.
pub struct LogSink;

#[async_trait]
impl CommandSink for LogSink {
    async fn add(&self, name: &str) -> Result<(), AppError> {
        tracing::info!(name, "whitelist add (sync disabled)");
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), AppError> {
        tracing::info!(name, "whitelist remove (sync disabled)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording(Mutex<Vec<SyncCommand>>);

    #[async_trait]
    impl CommandSink for Recording {
        async fn add(&self, name: &str) -> Result<(), AppError> {
            self.0
                .lock()
                .unwrap()
                .push(SyncCommand::Add(name.to_string()));
            Ok(())
        }

        async fn remove(&self, name: &str) -> Result<(), AppError> {
            self.0
                .lock()
                .unwrap()
                .push(SyncCommand::Remove(name.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn worker_preserves_dispatch_order() {
        let sink = Arc::new(Recording(Mutex::new(Vec::new())));
        let (handle, worker) = spawn(sink.clone());

        handle.dispatch_remove("OldName");
        handle.dispatch_add("NewName");
        drop(handle);
        worker.await.unwrap();

        let seen = sink.0.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                SyncCommand::Remove("OldName".to_string()),
                SyncCommand::Add("NewName".to_string()),
            ]
        );
    }
}
