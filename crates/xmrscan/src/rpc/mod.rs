//! Daemon RPC plumbing (the `full` feature).
//!
//! This layer only fetches and deserializes; all recognition stays in
//! [`scan`](crate::scan). Blocking I/O lives here and nowhere else in
//! the crate.

pub mod daemon;

pub use daemon::{DaemonClient, DaemonError};
