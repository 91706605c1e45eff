pub mod config;
pub mod logging;
pub mod mods;
pub mod report;
pub mod session;
pub mod version;
