use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No version entry registered for mod: {0}")]
    NotFound(String),

    #[error("Version store lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedVersionError {
    #[error("Version string is empty")]
    Empty,

    #[error("Version '{version}' has {count} components, at most 4 are allowed")]
    TooManyComponents { version: String, count: usize },

    #[error("Version '{version}' has non-numeric component '{component}'")]
    NonNumeric { version: String, component: String },

    #[error("Version '{version}' has out of range component '{component}'")]
    OutOfRange { version: String, component: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status, rendered as e.g. `404 Not Found`
    #[error("{0}")]
    Status(String),
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Response is not an XML version descriptor")]
    NotXml,

    #[error("Malformed version descriptor: {0}")]
    Parse(#[from] quick_xml::DeError),
}

/// Everything that can end a single mod's version check in `Error`
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Timed out after {timeout_ms} ms fetching {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("No version number in local or remote descriptor")]
    MissingVersion,

    #[error(
        "Malformed version string.\n\nNote to mod author: use numeric dotted version numbers, \
         major.minor[.build[.revision]], where build and revision are optional.\n\n{0}"
    )]
    MalformedVersion(#[from] MalformedVersionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
