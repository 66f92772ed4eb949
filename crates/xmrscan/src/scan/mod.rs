//! The pure scanning pipeline: extra-field parsing, per-output
//! recognition, and the block-level facade.
//!
//! Nothing in this module performs I/O or holds state between
//! transactions; for fixed inputs the output list is byte-identical
//! across runs.

pub mod amount;
pub mod block;
pub mod extra;
pub mod recognizer;
pub mod types;

pub use amount::{format_xmr, SafeAmountCeiling, PICONERO_PER_XMR};
pub use block::{filter_owned, scan_transactions, ScanIssue};
pub use extra::{parse_extra, ExtraKeys};
pub use recognizer::recognize_outputs;
pub use types::{CandidateOutput, Transaction, TransactionEntry};
