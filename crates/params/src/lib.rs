//! Protocol constants for the key-share subsystem.
//!
//! Everything in this crate is immutable data: numeric identifiers, the
//! named-group registry and its lookup helpers, object identifiers, and the
//! signature-algorithm relation. No cryptography happens here.

pub mod groups;
pub mod nid;
pub mod oid;
pub mod sigalg;

pub use groups::{
    find_group, group_id_for_name, group_id_for_nid, name_for_group_id, CurveId, GroupKind,
    NamedGroup, PqAlgorithmId, NAMED_GROUPS,
};
pub use nid::Nid;
pub use sigalg::{
    find_signature_by_algs, find_signature_by_oid, key_implies_no_digest, SignatureOid,
    SIGNATURE_OIDS,
};
