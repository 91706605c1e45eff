//! Shared test utilities

mod transport;

#[allow(unused_imports)]
pub use transport::{Reply, ScriptedTransport, descriptor};
