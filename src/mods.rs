//! Installed mod discovery and local descriptor loading

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::version::error::{DescriptorError, StoreError};
use crate::version::record::{VersionRecord, parse_descriptor};
use crate::version::store::VersionStore;

/// A mod directory under the mods root. The directory name is its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledMod {
    pub identifier: String,
    pub directory: PathBuf,
}

impl InstalledMod {
    /// Read this mod's local descriptor at `descriptor_path` (relative to the mod directory)
    pub fn read_local(&self, descriptor_path: &Path) -> Result<VersionRecord, DescriptorError> {
        read_descriptor(&self.directory.join(descriptor_path))
    }
}

/// List mod directories under `root`, sorted by identifier. Hidden entries are skipped.
pub fn discover_mods(root: &Path) -> std::io::Result<Vec<InstalledMod>> {
    let mut mods = Vec::new();

    for dir_entry in std::fs::read_dir(root)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_dir() {
            continue;
        }

        let identifier = dir_entry.file_name().to_string_lossy().into_owned();
        if identifier.starts_with('.') {
            continue;
        }

        mods.push(InstalledMod {
            identifier,
            directory: dir_entry.path(),
        });
    }

    mods.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    debug!("Discovered {} mods under {:?}", mods.len(), root);
    Ok(mods)
}

/// Read a descriptor file. A missing file is an undeclared, all-empty record.
pub fn read_descriptor(path: &Path) -> Result<VersionRecord, DescriptorError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => parse_descriptor(&raw),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(VersionRecord::default()),
        Err(source) => Err(DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Register every mod in `mods` with `store`, returning how many new entries were added.
///
/// Mods whose descriptor cannot be read are registered in the error state.
pub fn register_installed(
    store: &VersionStore,
    mods: &[InstalledMod],
    descriptor_path: &Path,
) -> Result<usize, StoreError> {
    let mut added = 0;

    for installed in mods {
        let inserted = match installed.read_local(descriptor_path) {
            Ok(local) => store.register(&installed.identifier, local)?,
            Err(e) => {
                warn!(
                    "Failed to read version descriptor for {}: {}",
                    installed.identifier, e
                );
                store.register_unreadable(
                    &installed.identifier,
                    format!("Could not read local version descriptor: {}", e),
                )?
            }
        };
        if inserted {
            added += 1;
        }
    }

    Ok(added)
}
