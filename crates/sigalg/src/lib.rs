//! Signature-algorithm dispatch for X.509/TLS signing and verification.
//!
//! Maps between on-the-wire `AlgorithmIdentifier` descriptors and runtime
//! (digest, public-key) pairs, including the RSA-PSS and pure-signature
//! special cases where the OID implies the hash or there is none.

pub mod algorithm;
pub mod digest;
pub mod pss;

pub use algorithm::{
    signature_algorithm, verification_params, AlgorithmIdentifier, PssVerification, PublicKeyInfo,
    RsaPadding, SigningContext, SigningKey, VerificationParams,
};
pub use digest::MessageDigest;
pub use pss::{MaskGenAlgorithm, RsaPssParams};
