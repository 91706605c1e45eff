//! Transport trait for retrieving remote version descriptors

#[cfg(test)]
use mockall::automock;

use crate::version::error::TransportError;

/// Trait for fetching a remote version descriptor
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Retrieves the body stored at `url`
    ///
    /// # Returns
    /// * `Ok(String)` - The response body of a successful request
    /// * `Err(TransportError)` - If the request could not be built, failed, or
    ///   returned a non-success status
    async fn fetch(&self, url: &str) -> Result<String, TransportError>;
}
