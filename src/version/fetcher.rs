//! Per-mod fetch, parse and compare cycle

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::version::comparator::ModVersion;
use crate::version::error::{FetchError, StoreError};
use crate::version::record::{VersionRecord, parse_descriptor};
use crate::version::store::{VersionStatus, VersionStore};
use crate::version::transport::Transport;

/// Drives one mod's entry from `Fetching` to a terminal status
///
/// Handles:
/// - Skipping mods that declare no version (`NotImplemented`, no request)
/// - Fetching the remote descriptor within the configured timeout
/// - Parsing and comparing the local and remote versions
/// - Recording any failure in the entry's error log
pub struct VersionFetcher {
    store: Arc<VersionStore>,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl VersionFetcher {
    pub fn new(store: Arc<VersionStore>, transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            store,
            transport,
            timeout,
        }
    }

    /// Run the check for `identifier` and return the terminal status it reached.
    ///
    /// Entries that are already terminal are returned as they are. Only store
    /// errors escape; every other failure ends in `VersionStatus::Error`.
    pub async fn run(&self, identifier: &str) -> Result<VersionStatus, StoreError> {
        let entry = self.store.get(identifier)?;
        if entry.status.is_terminal() {
            debug!(
                "Skipping {}: already {}",
                identifier,
                entry.status.as_str()
            );
            return Ok(entry.status);
        }

        let status = match self.check(identifier, &entry.local).await {
            Ok(status) => status,
            Err(FetchError::Store(e)) => return Err(e),
            Err(e) => {
                warn!("Version check failed for {}: {}", identifier, e);
                self.store.append_error(identifier, e.to_string())?;
                VersionStatus::Error
            }
        };

        self.store.set_status(identifier, status)?;
        info!("Version check for {} finished: {}", identifier, status.as_str());
        Ok(status)
    }

    async fn check(
        &self,
        identifier: &str,
        local: &VersionRecord,
    ) -> Result<VersionStatus, FetchError> {
        if !local.is_declared() {
            return Ok(VersionStatus::NotImplemented);
        }

        let body = self.fetch_body(&local.source_url).await?;
        let remote = parse_descriptor(&body)?;
        self.store.set_remote(identifier, remote.clone())?;

        if !remote.is_declared() {
            return Err(FetchError::MissingVersion);
        }

        let local_version = ModVersion::parse(&local.version)?;
        let remote_version = ModVersion::parse(&remote.version)?;
        debug!(
            "{}: local {} remote {}",
            identifier, local_version, remote_version
        );

        if local_version >= remote_version {
            Ok(VersionStatus::Latest)
        } else {
            Ok(VersionStatus::Outdated)
        }
    }

    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        match tokio::time::timeout(self.timeout, self.transport.fetch(url)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}
