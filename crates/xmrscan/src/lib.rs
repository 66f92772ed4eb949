//! View-key output scanning for Monero blocks.
//!
//! The core of this crate is intentionally "view-only" and offline:
//! - It does NOT trust any remote wallet service.
//! - It only inspects transaction data the caller (or the optional RPC
//!   layer) already fetched.
//!
//! Responsibilities:
//! - Parse the transaction `extra` blob for tx public keys.
//! - Filter outputs with the one-byte view tag before any curve work.
//! - Recover the destination spend key by inverting the stealth-address
//!   derivation, and decrypt the RingCT amount.
//!
//! Higher layers can:
//! - feed in transactions from any source,
//! - reconcile recovered spend keys against their owned-subaddress set,
//! - fetch blocks through the `full`-feature daemon client.

pub mod core;
pub mod scan;

#[cfg(feature = "full")]
pub mod client;
#[cfg(feature = "full")]
pub mod rpc;
