//! Per-output recognition: candidate key choice, view-tag filtering,
//! spend-key recovery, and amount decryption.
//!
//! The pipeline never raises on chain content. Anything it cannot
//! interpret (missing tagged key, non-curve point, short ecdh blob) is
//! skipped with a `debug!` trace, so a scan's success depends only on the
//! caller's key material.

use tracing::debug;

use crate::core::{
    decrypt_amount, derivation_to_scalar, derive_view_tag, key_derivation, recover_spend_pubkey,
    Derivation, PrivateViewKey, PublicPoint,
};
use crate::scan::amount::{format_xmr, SafeAmountCeiling};
use crate::scan::extra::ExtraKeys;
use crate::scan::types::{CandidateOutput, TransactionEntry};

/// Per-transaction memo of derivations keyed by tx pubkey bytes.
///
/// The primary key repeats across every output and a transaction rarely
/// carries more than a handful of distinct keys, so a linear scan is
/// cheaper than hashing. Failed point decodes are cached too; a bad key
/// should cost one decode attempt, not one per output.
struct DerivationCache {
    entries: Vec<([u8; 32], Option<Derivation>)>,
}

impl DerivationCache {
    fn new() -> Self {
        DerivationCache {
            entries: Vec::new(),
        }
    }

    fn derivation(&mut self, view_key: &PrivateViewKey, pubkey: &[u8; 32]) -> Option<Derivation> {
        if let Some((_, cached)) = self.entries.iter().find(|(key, _)| key == pubkey) {
            return *cached;
        }

        let derived = PublicPoint::from_bytes(*pubkey)
            .map(|point| key_derivation(&point, view_key.scalar()));
        self.entries.push((*pubkey, derived));
        derived
    }
}

/// Run the recognizer over every output of one transaction.
///
/// `keys` must come from [`parse_extra`](crate::scan::parse_extra) on the
/// same transaction and carry a primary tx public key; transactions
/// without one yield zero candidates and are filtered by the caller.
pub fn recognize_outputs(
    entry: &TransactionEntry,
    keys: &ExtraKeys,
    view_key: &PrivateViewKey,
    ceiling: SafeAmountCeiling,
) -> Vec<CandidateOutput> {
    let tx = &entry.tx;
    let mut cache = DerivationCache::new();
    let mut candidates = Vec::new();

    let Some(primary_pubkey) = keys.tx_pubkey else {
        return candidates;
    };

    for (index, output) in tx.vout.iter().enumerate() {
        let i = index as u64;

        let Some(tagged) = output.target.tagged_key.as_ref() else {
            debug!(tx = %entry.hash, index, "output has no tagged key, skipping");
            continue;
        };
        let Some(output_key) = decode_key32(&tagged.key) else {
            debug!(tx = %entry.hash, index, "malformed output key hex, skipping");
            continue;
        };
        let Some(view_tag) = decode_view_tag(&tagged.view_tag) else {
            debug!(tx = %entry.hash, index, "malformed view tag hex, skipping");
            continue;
        };

        // Candidate tx pubkeys for this output. An additional key at
        // i − 1 REPLACES the primary; the one at i is a fallback. The
        // off-by-one is the wire convention and must not be "fixed".
        let chosen = match index.checked_sub(1).and_then(|p| keys.additional_pubkeys.get(p)) {
            Some(additional) => *additional,
            None => primary_pubkey,
        };
        let fallback = keys
            .additional_pubkeys
            .get(index)
            .copied()
            .filter(|key| *key != chosen);

        // View-tag filter: one keccak per candidate, no curve work on
        // the output key yet. This rejects ≈255/256 of foreign outputs.
        let matched = [Some(chosen), fallback]
            .into_iter()
            .flatten()
            .find_map(|pubkey| {
                let derivation = cache.derivation(view_key, &pubkey)?;
                (derive_view_tag(&derivation, i) == view_tag).then_some((pubkey, derivation))
            });
        let Some((matched_pubkey, derivation)) = matched else {
            continue;
        };

        let Some(output_point) = PublicPoint::from_bytes(output_key) else {
            debug!(tx = %entry.hash, index, "output key is not a curve point, skipping");
            continue;
        };

        // Invert P = H_s(d ‖ i)·G + D to get the destination spend key.
        let scalar = derivation_to_scalar(&derivation, i);
        let recovered = recover_spend_pubkey(&output_point, &scalar);

        // Amount first, filter second. RingCT outputs decrypt the ecdh
        // blob; coinbase outputs carry the amount in the clear.
        let amount_piconero = match tx.encrypted_amount(index) {
            Some(encrypted) => decrypt_amount(&encrypted, &scalar),
            None if tx.is_coinbase() => output.amount,
            None => {
                debug!(tx = %entry.hash, index, "no 8-byte encrypted amount, skipping");
                continue;
            }
        };

        if !ceiling.allows(amount_piconero) {
            debug!(
                tx = %entry.hash,
                index,
                amount_piconero,
                "amount above safe ceiling, dropping likely false positive"
            );
            continue;
        }

        candidates.push(CandidateOutput {
            tx_hash: entry.hash.clone(),
            output_index: i,
            recovered_public_spend_key: recovered.to_hex(),
            amount_piconero,
            amount_xmr: format_xmr(amount_piconero),
            tx_public_key: hex::encode(matched_pubkey),
            output_key: hex::encode(output_key),
            tx_version: tx.version,
            unlock_time: tx.unlock_time,
            input_count: tx.vin.len(),
            output_count: tx.vout.len(),
            rct_type: tx.rct_type(),
            is_coinbase: tx.is_coinbase(),
        });
    }

    candidates
}

fn decode_key32(hex_key: &str) -> Option<[u8; 32]> {
    let bytes = hex::decode(hex_key).ok()?;
    bytes.as_slice().try_into().ok()
}

fn decode_view_tag(hex_tag: &str) -> Option<u8> {
    let bytes = hex::decode(hex_tag).ok()?;
    match bytes.as_slice() {
        [tag] => Some(*tag),
        _ => None,
    }
}
