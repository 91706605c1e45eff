//! Session-scoped table of per-mod version state

use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::version::error::StoreError;
use crate::version::record::VersionRecord;

/// Status of a mod's version check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionStatus {
    /// Remote descriptor has not arrived yet
    Fetching,
    /// Installed version is at least the published one
    Latest,
    /// A newer version is published
    Outdated,
    /// The mod does not declare a version
    NotImplemented,
    /// The check failed, see the entry's error log
    Error,
}

impl VersionStatus {
    pub fn is_terminal(self) -> bool {
        self != VersionStatus::Fetching
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Fetching => "fetching",
            VersionStatus::Latest => "latest",
            VersionStatus::Outdated => "outdated",
            VersionStatus::NotImplemented => "not_implemented",
            VersionStatus::Error => "error",
        }
    }
}

/// Version state of one installed mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModVersionEntry {
    pub local: VersionRecord,
    pub remote: Option<VersionRecord>,
    pub status: VersionStatus,
    pub error_log: Vec<String>,
}

impl ModVersionEntry {
    fn new(local: VersionRecord) -> Self {
        let status = if local.is_declared() {
            VersionStatus::Fetching
        } else {
            VersionStatus::NotImplemented
        };
        Self {
            local,
            remote: None,
            status,
            error_log: Vec::new(),
        }
    }

    /// Error log lines joined in the order they were appended
    pub fn error_text(&self) -> String {
        self.error_log.join("\n")
    }
}

/// Keyed storage of [`ModVersionEntry`] values for one session.
///
/// Entries keep registration order. Every operation takes the table lock for
/// the duration of a single read or write, so concurrent fetch tasks working on
/// distinct identifiers never observe each other's partial updates.
#[derive(Debug, Default)]
pub struct VersionStore {
    entries: Mutex<IndexMap<String, ModVersionEntry>>,
}

impl VersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, IndexMap<String, ModVersionEntry>>, StoreError> {
        self.entries.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn with_entry<R>(
        &self,
        identifier: &str,
        f: impl FnOnce(&mut ModVersionEntry) -> R,
    ) -> Result<R, StoreError> {
        let mut entries = self.lock_entries()?;
        let entry = entries
            .get_mut(identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        Ok(f(entry))
    }

    /// Register a mod with its local descriptor.
    ///
    /// Returns false, leaving the existing entry untouched, if the identifier is
    /// already registered.
    pub fn register(&self, identifier: &str, local: VersionRecord) -> Result<bool, StoreError> {
        self.insert(identifier, ModVersionEntry::new(local))
    }

    /// Register a mod whose local descriptor exists but could not be read
    pub fn register_unreadable(&self, identifier: &str, message: String) -> Result<bool, StoreError> {
        let entry = ModVersionEntry {
            local: VersionRecord::default(),
            remote: None,
            status: VersionStatus::Error,
            error_log: vec![message],
        };
        self.insert(identifier, entry)
    }

    fn insert(&self, identifier: &str, entry: ModVersionEntry) -> Result<bool, StoreError> {
        let mut entries = self.lock_entries()?;
        if entries.contains_key(identifier) {
            warn!("Mod {} is already registered, keeping existing entry", identifier);
            return Ok(false);
        }

        debug!("Registered {} with status {}", identifier, entry.status.as_str());
        entries.insert(identifier.to_string(), entry);
        Ok(true)
    }

    pub fn get(&self, identifier: &str) -> Result<ModVersionEntry, StoreError> {
        self.with_entry(identifier, |entry| entry.clone())
    }

    /// Record the fetched remote descriptor. Only the first write is kept.
    pub fn set_remote(&self, identifier: &str, remote: VersionRecord) -> Result<(), StoreError> {
        self.with_entry(identifier, |entry| {
            if entry.remote.is_some() {
                warn!("Remote version for {} already recorded, ignoring", identifier);
            } else {
                entry.remote = Some(remote);
            }
        })
    }

    /// Update the status. Terminal statuses are final.
    pub fn set_status(&self, identifier: &str, status: VersionStatus) -> Result<(), StoreError> {
        self.with_entry(identifier, |entry| {
            if entry.status.is_terminal() && entry.status != status {
                warn!(
                    "Ignoring status {} for {}: already {}",
                    status.as_str(),
                    identifier,
                    entry.status.as_str()
                );
            } else {
                entry.status = status;
            }
        })
    }

    pub fn append_error(&self, identifier: &str, line: String) -> Result<(), StoreError> {
        self.with_entry(identifier, |entry| entry.error_log.push(line))
    }

    /// Identifiers in registration order
    pub fn identifiers(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.lock_entries()?.keys().cloned().collect())
    }

    /// Copy of every entry in registration order
    pub fn snapshot(&self) -> Result<Vec<(String, ModVersionEntry)>, StoreError> {
        Ok(self
            .lock_entries()?
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect())
    }

    /// True once no entry is still fetching
    pub fn is_settled(&self) -> Result<bool, StoreError> {
        Ok(self
            .lock_entries()?
            .values()
            .all(|entry| entry.status.is_terminal()))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock_entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.lock_entries()?.is_empty())
    }
}
