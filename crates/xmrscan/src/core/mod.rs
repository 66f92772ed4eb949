pub mod derive;
pub mod hash;
pub mod keys;
pub mod point;
pub mod scalar;

pub use derive::{
    decrypt_amount, derivation_to_scalar, derive_view_tag, encrypt_amount, key_derivation,
    recover_spend_pubkey, Derivation,
};
pub use hash::{hash_to_scalar, keccak256, varint_encode};
pub use keys::{KeyParseError, PrivateViewKey};
pub use point::PublicPoint;
pub use scalar::SecretScalar;
