//! Blocking HTTP client for a monerod instance.
//!
//! Two endpoints are used:
//! - JSON-RPC `get_block` (by height) for the block body, which carries
//!   the miner transaction inline plus the hashes of all others;
//! - raw `/get_transactions` with `decode_as_json` for the bodies of
//!   those hashes, batched to keep request sizes bounded.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::scan::types::{Transaction, TransactionEntry};

/// Hashes per `/get_transactions` request.
const TX_FETCH_BATCH: usize = 100;

/// Errors from talking to the daemon. All of these are transport or
/// protocol level; per-transaction decode problems are logged and
/// skipped instead (a single bad tx must not abort a block).
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("daemon rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("daemon returned status {0:?}")]
    BadStatus(String),

    #[error("unexpected daemon response: {0}")]
    Response(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid proxy url: {0}")]
    Proxy(reqwest::Error),
}

/// A fetched block, flattened to what the scanner needs.
#[derive(Debug, Clone)]
pub struct BlockTransactions {
    pub height: u64,

    /// Miner transaction first, then the block's transactions in block
    /// order, so scanning preserves chain order.
    pub entries: Vec<TransactionEntry>,
}

pub struct DaemonClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl DaemonClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DaemonError> {
        Self::build(base_url, None)
    }

    /// Route all daemon traffic through a proxy (e.g. `socks5h://...`).
    /// Proxying is purely a transport concern; nothing above this client
    /// changes.
    pub fn with_proxy(
        base_url: impl Into<String>,
        proxy_url: &str,
    ) -> Result<Self, DaemonError> {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(DaemonError::Proxy)?;
        Self::build(base_url, Some(proxy))
    }

    fn build(
        base_url: impl Into<String>,
        proxy: Option<reqwest::Proxy>,
    ) -> Result<Self, DaemonError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(proxy) = proxy {
            builder = builder.proxy(proxy);
        }

        Ok(DaemonClient {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a block by height and return its transactions in scan order.
    pub fn get_block_transactions(&self, height: u64) -> Result<BlockTransactions, DaemonError> {
        let result = self.get_block(height)?;

        let body: BlockBody = serde_json::from_str(&result.json)?;

        let mut entries = Vec::with_capacity(1 + body.tx_hashes.len());
        entries.push(TransactionEntry {
            hash: result.block_header.miner_tx_hash,
            tx: body.miner_tx,
        });
        entries.extend(self.get_transactions(&body.tx_hashes)?);

        Ok(BlockTransactions {
            height: result.block_header.height,
            entries,
        })
    }

    /// JSON-RPC `get_block` by height.
    fn get_block(&self, height: u64) -> Result<GetBlockResult, DaemonError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": "0",
            "method": "get_block",
            "params": { "height": height },
        });

        let response: JsonRpcResponse<GetBlockResult> = self
            .http
            .post(format!("{}/json_rpc", self.base_url))
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(error) = response.error {
            return Err(DaemonError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| DaemonError::Response("missing result for get_block".to_string()))
    }

    /// Fetch transaction bodies via `/get_transactions`, batched at
    /// [`TX_FETCH_BATCH`] hashes per request.
    pub fn get_transactions(
        &self,
        hashes: &[String],
    ) -> Result<Vec<TransactionEntry>, DaemonError> {
        let mut entries = Vec::with_capacity(hashes.len());

        for chunk in hashes.chunks(TX_FETCH_BATCH) {
            let request = serde_json::json!({
                "txs_hashes": chunk,
                "decode_as_json": true,
            });

            let response: GetTransactionsResponse = self
                .http
                .post(format!("{}/get_transactions", self.base_url))
                .json(&request)
                .send()?
                .error_for_status()?
                .json()?;

            if response.status != "OK" {
                return Err(DaemonError::BadStatus(response.status));
            }

            for tx in response.txs {
                match serde_json::from_str::<Transaction>(&tx.as_json) {
                    Ok(parsed) => entries.push(TransactionEntry {
                        hash: tx.tx_hash,
                        tx: parsed,
                    }),
                    Err(err) => {
                        warn!(tx = %tx.tx_hash, %err, "failed to decode transaction json, skipping");
                    }
                }
            }
        }

        Ok(entries)
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct GetBlockResult {
    /// Stringified JSON of the block body.
    json: String,
    block_header: BlockHeader,
}

#[derive(Debug, Deserialize)]
struct BlockHeader {
    #[serde(default)]
    height: u64,
    #[serde(default)]
    miner_tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct BlockBody {
    miner_tx: Transaction,
    #[serde(default)]
    tx_hashes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GetTransactionsResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    txs: Vec<FetchedTx>,
}

#[derive(Debug, Deserialize)]
struct FetchedTx {
    #[serde(default)]
    tx_hash: String,
    #[serde(default)]
    as_json: String,
}
