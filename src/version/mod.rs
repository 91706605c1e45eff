//! Version checking layer for installed mods
//!
//! This module provides the core functionality for fetching, storing, and comparing
//! a mod's declared version against the version its author publishes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Transport  │◀────│   Fetcher   │────▶│    Store    │
//! │  (network)  │     │ (per mod)   │     │  (session)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Transports  │     │ Comparator  │
//! │   (http)    │     │(version cmp)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`comparator`]: Numeric dotted version parsing and ordering
//! - [`error`]: Error types for store, transport and descriptor operations
//! - [`fetcher`]: One fetch/parse/compare cycle per mod
//! - [`record`]: The version descriptor value type and its XML form
//! - [`store`]: Session-scoped per-mod status table
//! - [`transport`]: Transport trait for retrieving remote descriptors
//! - [`transports`]: Concrete transport implementations (HTTP)

pub mod comparator;
pub mod error;
pub mod fetcher;
pub mod record;
pub mod store;
pub mod transport;
pub mod transports;
