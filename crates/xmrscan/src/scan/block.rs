//! Block-level facade over the recognizer.
//!
//! This is *best-effort* over chain content: any transaction the pipeline
//! cannot make sense of is recorded in the issue list and does not abort
//! the scan, so it is safe to run over large chunks of history.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::core::PrivateViewKey;
use crate::scan::amount::SafeAmountCeiling;
use crate::scan::extra::parse_extra;
use crate::scan::recognizer::recognize_outputs;
use crate::scan::types::{CandidateOutput, TransactionEntry};

/// A non-fatal issue encountered while scanning a transaction.
///
/// Lightweight on purpose: callers can log it, surface it, or ignore it.
#[derive(Debug, Clone, Serialize)]
pub struct ScanIssue {
    pub tx_hash: String,
    pub error: String,
}

/// Scan a sequence of transactions for outputs plausibly addressed to
/// `view_key`'s wallet.
///
/// Candidates come back in (transaction order, output index) order, and
/// for fixed inputs the result is byte-identical across runs. A
/// transaction whose extra field yields no primary tx public key
/// contributes zero candidates and one [`ScanIssue`].
pub fn scan_transactions(
    txs: &[TransactionEntry],
    view_key: &PrivateViewKey,
    ceiling: SafeAmountCeiling,
) -> (Vec<CandidateOutput>, Vec<ScanIssue>) {
    let mut candidates = Vec::new();
    let mut issues = Vec::new();

    for entry in txs {
        let keys = parse_extra(&entry.tx.extra);

        if keys.tx_pubkey.is_none() {
            debug!(tx = %entry.hash, "no primary tx public key in extra");
            issues.push(ScanIssue {
                tx_hash: entry.hash.clone(),
                error: "no primary tx public key in extra".to_string(),
            });
            continue;
        }

        candidates.extend(recognize_outputs(entry, &keys, view_key, ceiling));
    }

    (candidates, issues)
}

/// Keep only candidates whose recovered spend key appears in the caller's
/// owned-subaddress set (lowercase hex encodings).
///
/// The set is authoritative on the caller's side; this crate deliberately
/// keeps no subaddress index of its own.
pub fn filter_owned(
    candidates: Vec<CandidateOutput>,
    owned_spend_keys: &HashSet<String>,
) -> Vec<CandidateOutput> {
    candidates
        .into_iter()
        .filter(|candidate| owned_spend_keys.contains(&candidate.recovered_public_spend_key))
        .collect()
}
