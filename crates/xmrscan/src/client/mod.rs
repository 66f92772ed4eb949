//! High-level scan client: fetch blocks through the daemon, run the pure
//! pipeline, hand back candidates plus non-fatal issues.

use thiserror::Error;

use crate::core::PrivateViewKey;
use crate::rpc::{DaemonClient, DaemonError};
use crate::scan::amount::SafeAmountCeiling;
use crate::scan::block::{scan_transactions, ScanIssue};
use crate::scan::types::CandidateOutput;

/// Configuration for the scan client.
///
/// The safe-amount ceiling lives here, set once at construction; there is
/// no process-wide state. Callers wanting per-call control construct
/// another client.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub safe_amount_ceiling: SafeAmountCeiling,
}

/// Errors from high-level scan operations.
///
/// Pipeline problems on chain content never land here; they come back as
/// [`ScanIssue`]s. This is reserved for the transport underneath.
#[derive(Debug, Error)]
pub enum ScanClientError {
    #[error("daemon error: {0}")]
    Daemon(#[from] DaemonError),
}

pub struct ScanClient {
    daemon: DaemonClient,
    config: ScanConfig,
}

impl ScanClient {
    pub fn new(daemon: DaemonClient, config: ScanConfig) -> Self {
        ScanClient { daemon, config }
    }

    /// Access the underlying daemon client for lower-level queries.
    pub fn daemon(&self) -> &DaemonClient {
        &self.daemon
    }

    /// Scan one block by height.
    pub fn scan_height(
        &self,
        view_key: &PrivateViewKey,
        height: u64,
    ) -> Result<(Vec<CandidateOutput>, Vec<ScanIssue>), ScanClientError> {
        let block = self.daemon.get_block_transactions(height)?;
        Ok(scan_transactions(
            &block.entries,
            view_key,
            self.config.safe_amount_ceiling,
        ))
    }

    /// Scan an inclusive height range `[start, end]`, aggregating
    /// candidates and issues across blocks in height order.
    pub fn scan_height_range(
        &self,
        view_key: &PrivateViewKey,
        start: u64,
        end: u64,
    ) -> Result<(Vec<CandidateOutput>, Vec<ScanIssue>), ScanClientError> {
        let mut candidates = Vec::new();
        let mut issues = Vec::new();

        for height in start..=end {
            let (mut block_candidates, mut block_issues) = self.scan_height(view_key, height)?;
            candidates.append(&mut block_candidates);
            issues.append(&mut block_issues);
        }

        Ok((candidates, issues))
    }
}
