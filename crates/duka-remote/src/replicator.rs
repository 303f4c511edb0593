//! # Replication Worker
//!
//! Drains the store's outbound queue on an interval and fires each write
//! at the remote API.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Replicator Loop                                  │
//! │                                                                         │
//! │  every tick:                                                            │
//! │    1. lock the store, drain_outbound(), unlock                          │
//! │    2. for each write: PUT/POST/DELETE against the API                   │
//! │    3. success on any write  ──► store.set_online(true)                  │
//! │       failure on any write  ──► store.set_online(false), write dropped  │
//! │                                                                         │
//! │  Writes are attempted ONCE and never requeued. The sale ledger's        │
//! │  synced flags are reconciled by the store's own connectivity            │
//! │  handling, not by per-write acknowledgements.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store lock is held only while draining; all network calls happen
//! with the lock released so the register never stalls on a slow link.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use duka_store::{OutboundWrite, PosStore};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::RemoteApi;
use crate::error::{RemoteError, RemoteResult};

/// Default drain interval.
pub const DEFAULT_DRAIN_INTERVAL: Duration = Duration::from_secs(5);

/// Background worker replicating store writes to the remote API.
pub struct Replicator {
    store: Arc<Mutex<PosStore>>,
    api: RemoteApi,
    interval: Duration,
    shutdown_rx: mpsc::Receiver<()>,
}

/// Handle for controlling a running replicator.
#[derive(Clone)]
pub struct ReplicatorHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl ReplicatorHandle {
    /// Triggers graceful shutdown.
    pub async fn shutdown(&self) -> RemoteResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| RemoteError::BadResponse("replicator already stopped".into()))
    }
}

impl Replicator {
    /// Creates a replicator and its control handle.
    pub fn new(
        store: Arc<Mutex<PosStore>>,
        api: RemoteApi,
        interval: Duration,
    ) -> (Self, ReplicatorHandle) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let replicator = Replicator {
            store,
            api,
            interval,
            shutdown_rx,
        };
        (replicator, ReplicatorHandle { shutdown_tx })
    }

    /// Runs the drain loop. Spawn this as a background task.
    pub async fn run(mut self) {
        info!(interval_secs = self.interval.as_secs(), "replicator starting");

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.flush().await;
                }

                _ = self.shutdown_rx.recv() => {
                    info!("replicator shutting down");
                    break;
                }
            }
        }

        // Last chance for writes queued since the previous tick.
        self.flush().await;

        info!("replicator stopped");
    }

    /// Drains the queue and attempts every write once.
    async fn flush(&self) {
        let writes = match self.store.lock() {
            Ok(mut store) => store.drain_outbound(),
            Err(poisoned) => poisoned.into_inner().drain_outbound(),
        };

        if writes.is_empty() {
            return;
        }

        debug!(count = writes.len(), "flushing outbound writes");

        let mut any_success = false;
        let mut any_failure = false;

        for write in writes {
            let kind = write.kind();
            match self.send(write).await {
                Ok(()) => any_success = true,
                Err(e) => {
                    any_failure = true;
                    warn!(kind, error = %e, "outbound write failed, dropped");
                }
            }
        }

        // Real traffic is the connectivity signal.
        if any_failure {
            self.set_online(false);
        } else if any_success {
            self.set_online(true);
        }
    }

    async fn send(&self, write: OutboundWrite) -> RemoteResult<()> {
        match write {
            OutboundWrite::CreateProduct(product) => self.api.create_product(&product).await,
            OutboundWrite::UpdateProduct { id, patch } => {
                self.api.update_product(id, &patch).await
            }
            OutboundWrite::DeleteProduct(id) => self.api.delete_product(id).await,
            OutboundWrite::CreateSale(sale) => self.api.create_sale(&sale).await,
        }
    }

    fn set_online(&self, online: bool) {
        match self.store.lock() {
            Ok(mut store) => store.set_online(online),
            Err(poisoned) => poisoned.into_inner().set_online(online),
        }
    }
}

/// Pulls the remote catalog into the store, replacing the local cache.
pub async fn refresh_catalog(
    store: &Arc<Mutex<PosStore>>,
    api: &RemoteApi,
) -> RemoteResult<usize> {
    let products = api.fetch_products().await?;
    let count = products.len();
    match store.lock() {
        Ok(mut store) => {
            store.replace_products(products);
            store.set_online(true);
        }
        Err(poisoned) => {
            let mut store = poisoned.into_inner();
            store.replace_products(products);
            store.set_online(true);
        }
    }
    Ok(count)
}
