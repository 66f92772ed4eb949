use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::scalar::SecretScalar;

/// A point on edwards25519, carried in its 32-byte compressed Edwards-Y
/// form on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicPoint(pub EdwardsPoint);

impl PublicPoint {
    /// Serialize to the 32-byte compressed Edwards-Y representation.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Construct from the 32-byte compressed Edwards-Y representation.
    ///
    /// Returns `None` if the bytes do not represent a valid curve point.
    /// Chain data is attacker-controlled, so callers treat `None` as
    /// "skip whatever selected this key", never as a fatal error.
    pub fn from_bytes(bytes: [u8; 32]) -> Option<Self> {
        CompressedEdwardsY(bytes).decompress().map(PublicPoint)
    }

    /// Constant-time scalar-basepoint multiplication through the
    /// precomputed table. The scalar is secret; this must not leak it
    /// through timing.
    pub fn mul_base(scalar: &SecretScalar) -> Self {
        PublicPoint(EdwardsPoint::mul_base(&scalar.0))
    }

    /// Point negation. For this curve (a = −1) the negation of (x, y)
    /// is (−x, y); dalek's `Neg` uses exactly that identity.
    pub fn negate(self) -> Self {
        PublicPoint(-self.0)
    }

    /// Point addition.
    pub fn add(self, other: PublicPoint) -> Self {
        PublicPoint(self.0 + other.0)
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl Serialize for PublicPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(DeError::custom)?;
        if bytes.len() != 32 {
            return Err(DeError::custom("PublicPoint expects 32 bytes"));
        }

        let mut buf = [0u8; 32];
        buf.copy_from_slice(&bytes);

        PublicPoint::from_bytes(buf).ok_or_else(|| DeError::custom("invalid Edwards point"))
    }
}
