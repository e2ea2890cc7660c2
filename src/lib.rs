//! # tlskex
//!
//! TLS key-share negotiation between two peers using classical
//! Diffie-Hellman groups, post-quantum KEMs, or hybrids of the two, plus the
//! signature-algorithm dispatch used by the X.509/TLS signing paths.
//!
//! This is a facade crate that re-exports the sub-crates:
//!
//! - [`tlskex-api`]: error model, TLS alerts, shared-secret container
//! - [`tlskex-params`]: the named-group registry and protocol constants
//! - [`tlskex-keyshare`]: the key-share backends and factory
//! - [`tlskex-sigalg`]: AlgorithmIdentifier encoding and decoding

pub use tlskex_api as api;
pub use tlskex_keyshare as keyshare;
pub use tlskex_params as params;
pub use tlskex_sigalg as sigalg;

/// Re-exports commonly used items.
pub mod prelude {
    pub use tlskex_api::{Alert, Error, Result, SharedSecret};
    pub use tlskex_keyshare::KeyShare;
    pub use tlskex_params::{
        group_id_for_name, group_id_for_nid, name_for_group_id, GroupKind, NAMED_GROUPS,
    };
    pub use tlskex_sigalg::{
        signature_algorithm, verification_params, MessageDigest, PublicKeyInfo, SigningContext,
        SigningKey,
    };
}
