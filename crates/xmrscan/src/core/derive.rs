//! The derivation kernel: shared secrets, per-output scalars, view tags,
//! and the RingCT amount mask.
//!
//! All functions here are deterministic and allocation-light; the scanner
//! calls them once per candidate key or once per surviving output.

use crate::core::hash::{hash_to_scalar, keccak256, varint_encode};
use crate::core::point::PublicPoint;
use crate::core::scalar::SecretScalar;

const VIEW_TAG_DOMAIN: &[u8] = b"view_tag";
const AMOUNT_DOMAIN: &[u8] = b"amount";

/// The 32-byte encoding of the shared secret 8 · a · R.
///
/// Symmetric between sender and receiver: the sender computes 8 · r · A
/// with the ephemeral tx secret, the receiver 8 · a · R with the view key.
pub type Derivation = [u8; 32];

/// Compute the shared secret `encode(8 · view_priv · tx_pub)`.
///
/// The factor 8 clears the cofactor and lands the result in the
/// prime-order subgroup; omitting it breaks interoperability with every
/// output on mainnet.
pub fn key_derivation(tx_pubkey: &PublicPoint, view_priv: &SecretScalar) -> Derivation {
    let shared = view_priv.0 * tx_pubkey.0;
    shared.mul_by_cofactor().compress().to_bytes()
}

/// H_s(derivation ‖ varint(output_index)).
pub fn derivation_to_scalar(derivation: &Derivation, output_index: u64) -> SecretScalar {
    let mut buf = Vec::with_capacity(32 + 10);
    buf.extend_from_slice(derivation);
    varint_encode(output_index, &mut buf);
    hash_to_scalar(&buf)
}

/// The one-byte view tag committed in an output:
/// keccak256("view_tag" ‖ derivation ‖ varint(index))[0].
pub fn derive_view_tag(derivation: &Derivation, output_index: u64) -> u8 {
    let mut buf = Vec::with_capacity(VIEW_TAG_DOMAIN.len() + 32 + 10);
    buf.extend_from_slice(VIEW_TAG_DOMAIN);
    buf.extend_from_slice(derivation);
    varint_encode(output_index, &mut buf);
    keccak256(&buf)[0]
}

/// Invert the stealth-address formula P = H_s(d ‖ i)·G + D.
///
/// `scalar` must be `derivation_to_scalar(d, i)` for the output's matching
/// derivation; the result is the destination spend key D the output was
/// addressed to.
pub fn recover_spend_pubkey(output_key: &PublicPoint, scalar: &SecretScalar) -> PublicPoint {
    let sg = PublicPoint::mul_base(scalar);
    output_key.add(sg.negate())
}

fn amount_mask(scalar: &SecretScalar) -> [u8; 8] {
    let mut buf = Vec::with_capacity(AMOUNT_DOMAIN.len() + 32);
    buf.extend_from_slice(AMOUNT_DOMAIN);
    buf.extend_from_slice(&scalar.to_bytes());
    let digest = keccak256(&buf);

    let mut mask = [0u8; 8];
    mask.copy_from_slice(&digest[..8]);
    mask
}

/// Decrypt an 8-byte RingCT amount: XOR with the first 8 bytes of
/// keccak256("amount" ‖ s), read little-endian.
pub fn decrypt_amount(encrypted: &[u8; 8], scalar: &SecretScalar) -> u64 {
    let mask = amount_mask(scalar);
    let mut plain = [0u8; 8];
    for i in 0..8 {
        plain[i] = encrypted[i] ^ mask[i];
    }
    u64::from_le_bytes(plain)
}

/// Sender-side counterpart of [`decrypt_amount`]; the XOR is its own
/// inverse. Used when constructing outputs, which this crate only does
/// in tests and fixtures.
pub fn encrypt_amount(amount: u64, scalar: &SecretScalar) -> [u8; 8] {
    let mask = amount_mask(scalar);
    let plain = amount.to_le_bytes();
    let mut enc = [0u8; 8];
    for i in 0..8 {
        enc[i] = plain[i] ^ mask[i];
    }
    enc
}
