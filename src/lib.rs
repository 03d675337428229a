//! polydrop (workspace facade crate).
//!
//! Re-exports the workspace crates as `polydrop::{core,input,term,types}` and
//! hosts the pieces the terminal binary needs on top of them: environment
//! configuration and the JSON-lines event log.

pub mod config;
pub mod event_log;

pub use polydrop_core as core;
pub use polydrop_input as input;
pub use polydrop_term as term;
pub use polydrop_types as types;

pub use config::HostConfig;
pub use event_log::{EventLog, LogRecord};
