//! Check session: owns the version store and one fetch task per mod

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::config::FetchConfig;
use crate::mods::{InstalledMod, register_installed};
use crate::version::error::StoreError;
use crate::version::fetcher::VersionFetcher;
use crate::version::store::VersionStore;
use crate::version::transport::Transport;

/// A running version check over a set of mods.
///
/// The store lives exactly as long as the session. Dropping or closing the
/// session aborts fetches that have not finished; their results are discarded.
pub struct Session {
    store: Arc<VersionStore>,
    tasks: JoinSet<()>,
}

impl Session {
    /// Register `mods` in a fresh store and start checking them.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        mods: &[InstalledMod],
        descriptor_path: &Path,
        transport: Arc<dyn Transport>,
        fetch: &FetchConfig,
    ) -> Result<Self, StoreError> {
        let store = Arc::new(VersionStore::new());
        let added = register_installed(&store, mods, descriptor_path)?;
        info!("Opened version check session for {} mods", added);
        Self::start(store, transport, fetch)
    }

    /// Launch one fetch task for every identifier already registered in `store`.
    ///
    /// Fetches are started with staggered delays and run in parallel.
    pub fn start(
        store: Arc<VersionStore>,
        transport: Arc<dyn Transport>,
        fetch: &FetchConfig,
    ) -> Result<Self, StoreError> {
        let fetcher = Arc::new(VersionFetcher::new(
            Arc::clone(&store),
            transport,
            fetch.timeout(),
        ));
        let stagger = fetch.stagger();
        let mut tasks = JoinSet::new();

        for (i, identifier) in store.identifiers()?.into_iter().enumerate() {
            let fetcher = Arc::clone(&fetcher);
            let delay = stagger * u32::try_from(i).unwrap_or(u32::MAX);
            tasks.spawn(async move {
                sleep(delay).await;
                if let Err(e) = fetcher.run(&identifier).await {
                    error!("Version check for {} aborted: {}", identifier, e);
                }
            });
        }

        Ok(Self { store, tasks })
    }

    /// Shared handle for presenters polling the current statuses
    pub fn store(&self) -> &Arc<VersionStore> {
        &self.store
    }

    /// Wait until every fetch task has finished
    pub async fn wait(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                if e.is_panic() {
                    error!("Version check task panicked: {}", e);
                }
            }
        }
        debug!("All version check tasks finished");
    }

    /// End the session, abandoning any fetches still in flight
    pub fn close(mut self) {
        let pending = self.tasks.len();
        if pending > 0 {
            info!("Closing session with {} checks still in flight", pending);
        }
        self.tasks.abort_all();
    }
}
