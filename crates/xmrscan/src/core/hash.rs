//! Keccak-256 and varint primitives shared by the derivation pipeline.

use curve25519_dalek::scalar::Scalar;
use sha3::{Digest, Keccak256};

use crate::core::scalar::SecretScalar;

/// Keccak-256 over a byte string.
///
/// This is the original pre-standard Keccak, NOT NIST SHA3-256; the two
/// differ in the domain-separation padding byte and produce different
/// digests for every input.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// H_s: keccak256 reduced modulo the curve order ℓ.
pub fn hash_to_scalar(data: &[u8]) -> SecretScalar {
    SecretScalar(Scalar::from_bytes_mod_order(keccak256(data)))
}

/// Append the varint encoding of `value` to `buf`.
///
/// LEB128-style: 7-bit little-endian groups, continuation bit set on all
/// but the terminal group.
pub fn varint_encode(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}
