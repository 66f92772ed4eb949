//! Logical transaction shapes consumed by the scanner, plus the candidate
//! record it emits.
//!
//! The input structs mirror monerod's `decode_as_json` field names so they
//! deserialize straight from daemon responses; unknown fields (ring
//! members, range proofs, fees) are ignored.

use serde::{Deserialize, Serialize};

/// A transaction body in the logical shape the scanner consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub unlock_time: u64,

    #[serde(default)]
    pub vin: Vec<TxInput>,

    #[serde(default)]
    pub vout: Vec<TxOutput>,

    /// Raw extra blob; monerod emits it as an array of byte values.
    #[serde(default)]
    pub extra: Vec<u8>,

    #[serde(default)]
    pub rct_signatures: Option<RctSignatures>,
}

impl Transaction {
    /// Coinbase means a single input of the "gen" variant.
    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1 && self.vin[0].gen.is_some()
    }

    pub fn rct_type(&self) -> u8 {
        self.rct_signatures.as_ref().map_or(0, |rct| rct.rct_type)
    }

    /// The 8-byte encrypted amount for output `index`, when ecdhInfo has
    /// an aligned entry of exactly that length. Legacy 32-byte ecdh
    /// blobs and absent entries return `None`.
    pub fn encrypted_amount(&self, index: usize) -> Option<[u8; 8]> {
        let info = self.rct_signatures.as_ref()?.ecdh_info.get(index)?;
        let bytes = hex::decode(&info.amount).ok()?;
        bytes.as_slice().try_into().ok()
    }
}

/// A transaction paired with its hash, as fetched from a daemon.
#[derive(Debug, Clone)]
pub struct TransactionEntry {
    pub hash: String,
    pub tx: Transaction,
}

impl TransactionEntry {
    /// Parse a monerod `as_json` body and attach the hash it was fetched
    /// under.
    pub fn from_json_str(hash: impl Into<String>, json: &str) -> Result<Self, serde_json::Error> {
        Ok(TransactionEntry {
            hash: hash.into(),
            tx: serde_json::from_str(json)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxInput {
    /// Present on coinbase inputs; key inputs deserialize with this unset.
    #[serde(default)]
    pub gen: Option<GenInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenInput {
    #[serde(default)]
    pub height: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxOutput {
    /// Cleartext piconero amount: zero on RingCT outputs, the real value
    /// on coinbase outputs.
    #[serde(default)]
    pub amount: u64,

    pub target: TxOutTarget,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxOutTarget {
    /// Modern outputs carry key and view tag here; anything without it
    /// is skipped as malformed for scanning purposes.
    #[serde(default)]
    pub tagged_key: Option<TaggedKey>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaggedKey {
    /// 32-byte output key, hex.
    pub key: String,

    /// One-byte view tag, hex.
    pub view_tag: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RctSignatures {
    #[serde(rename = "type", default)]
    pub rct_type: u8,

    #[serde(rename = "ecdhInfo", default)]
    pub ecdh_info: Vec<EcdhInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EcdhInfo {
    /// Encrypted amount, hex; 16 chars on v2+ transactions.
    #[serde(default)]
    pub amount: String,
}

/// A scanned output that plausibly belongs to the wallet.
///
/// "Plausibly": the view-tag filter passes by chance for ≈1/256 of
/// foreign outputs and the safe-amount filter removes ≈90% of those, so
/// callers MUST reconcile `recovered_public_spend_key` against their
/// authoritative owned-subaddress set before treating the output as
/// theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateOutput {
    pub tx_hash: String,
    pub output_index: u64,

    /// The destination spend key recovered by inverting the
    /// stealth-address derivation, lowercase hex.
    pub recovered_public_spend_key: String,

    pub amount_piconero: u64,

    /// Decimal XMR with exactly 12 fractional digits.
    pub amount_xmr: String,

    /// The tx public key the derivation matched under (the primary key,
    /// or the additional key that replaced it for this output).
    pub tx_public_key: String,

    pub output_key: String,
    pub tx_version: u64,
    pub unlock_time: u64,
    pub input_count: usize,
    pub output_count: usize,
    pub rct_type: u8,
    pub is_coinbase: bool,
}
