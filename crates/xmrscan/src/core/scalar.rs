use curve25519_dalek::scalar::Scalar;
use zeroize::Zeroize;

/// A secret scalar on edwards25519, reduced modulo the group order ℓ.
///
/// Wraps `curve25519_dalek::Scalar` so the rest of the crate never handles
/// unreduced key material, and so secrets are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretScalar(pub Scalar);

impl Zeroize for SecretScalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretScalar {
    /// Construct from 32 little-endian bytes, reducing modulo ℓ.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        SecretScalar(Scalar::from_bytes_mod_order(bytes))
    }

    /// The canonical 32-byte little-endian encoding. Always in [0, ℓ).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

// Debug redacted: scalars in this crate are view keys or values derived
// from them, and must not end up in logs.
impl std::fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}
