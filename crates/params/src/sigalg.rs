//! The signature-algorithm relation: OID ↔ (digest, key type).
//!
//! A digest NID of [`nid::UNDEF`] marks an algorithm whose OID implies its
//! own hashing (RSA-PSS carries it in parameters; Ed25519 and the
//! post-quantum schemes have none).

use const_oid::ObjectIdentifier;

use crate::nid::{self, Nid};
use crate::oid;

/// One row of the relation.
#[derive(Debug, Clone, Copy)]
pub struct SignatureOid {
    pub sig_nid: Nid,
    pub digest_nid: Nid,
    pub pkey_nid: Nid,
    pub oid: ObjectIdentifier,
}

pub static SIGNATURE_OIDS: &[SignatureOid] = &[
    SignatureOid { sig_nid: nid::SHA1_WITH_RSA_ENCRYPTION, digest_nid: nid::SHA1, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::SHA1_WITH_RSA_ENCRYPTION },
    SignatureOid { sig_nid: nid::SHA224_WITH_RSA_ENCRYPTION, digest_nid: nid::SHA224, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::SHA224_WITH_RSA_ENCRYPTION },
    SignatureOid { sig_nid: nid::SHA256_WITH_RSA_ENCRYPTION, digest_nid: nid::SHA256, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::SHA256_WITH_RSA_ENCRYPTION },
    SignatureOid { sig_nid: nid::SHA384_WITH_RSA_ENCRYPTION, digest_nid: nid::SHA384, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::SHA384_WITH_RSA_ENCRYPTION },
    SignatureOid { sig_nid: nid::SHA512_WITH_RSA_ENCRYPTION, digest_nid: nid::SHA512, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::SHA512_WITH_RSA_ENCRYPTION },
    SignatureOid { sig_nid: nid::ECDSA_WITH_SHA1, digest_nid: nid::SHA1, pkey_nid: nid::EC_PUBLIC_KEY, oid: oid::ECDSA_WITH_SHA1 },
    SignatureOid { sig_nid: nid::ECDSA_WITH_SHA224, digest_nid: nid::SHA224, pkey_nid: nid::EC_PUBLIC_KEY, oid: oid::ECDSA_WITH_SHA224 },
    SignatureOid { sig_nid: nid::ECDSA_WITH_SHA256, digest_nid: nid::SHA256, pkey_nid: nid::EC_PUBLIC_KEY, oid: oid::ECDSA_WITH_SHA256 },
    SignatureOid { sig_nid: nid::ECDSA_WITH_SHA384, digest_nid: nid::SHA384, pkey_nid: nid::EC_PUBLIC_KEY, oid: oid::ECDSA_WITH_SHA384 },
    SignatureOid { sig_nid: nid::ECDSA_WITH_SHA512, digest_nid: nid::SHA512, pkey_nid: nid::EC_PUBLIC_KEY, oid: oid::ECDSA_WITH_SHA512 },
    SignatureOid { sig_nid: nid::RSASSA_PSS, digest_nid: nid::UNDEF, pkey_nid: nid::RSA_ENCRYPTION, oid: oid::RSASSA_PSS },
    SignatureOid { sig_nid: nid::ED25519, digest_nid: nid::UNDEF, pkey_nid: nid::ED25519, oid: oid::ED25519 },
    SignatureOid { sig_nid: nid::DILITHIUM2, digest_nid: nid::UNDEF, pkey_nid: nid::DILITHIUM2, oid: oid::DILITHIUM2 },
    SignatureOid { sig_nid: nid::DILITHIUM3, digest_nid: nid::UNDEF, pkey_nid: nid::DILITHIUM3, oid: oid::DILITHIUM3 },
    SignatureOid { sig_nid: nid::DILITHIUM5, digest_nid: nid::UNDEF, pkey_nid: nid::DILITHIUM5, oid: oid::DILITHIUM5 },
    SignatureOid { sig_nid: nid::FALCON512, digest_nid: nid::UNDEF, pkey_nid: nid::FALCON512, oid: oid::FALCON512 },
    SignatureOid { sig_nid: nid::FALCON1024, digest_nid: nid::UNDEF, pkey_nid: nid::FALCON1024, oid: oid::FALCON1024 },
    SignatureOid { sig_nid: nid::SPHINCS_SHA2_128F_SIMPLE, digest_nid: nid::UNDEF, pkey_nid: nid::SPHINCS_SHA2_128F_SIMPLE, oid: oid::SPHINCS_SHA2_128F_SIMPLE },
    SignatureOid { sig_nid: nid::SPHINCS_SHA2_128S_SIMPLE, digest_nid: nid::UNDEF, pkey_nid: nid::SPHINCS_SHA2_128S_SIMPLE, oid: oid::SPHINCS_SHA2_128S_SIMPLE },
];

pub fn find_signature_by_oid(oid: &ObjectIdentifier) -> Option<&'static SignatureOid> {
    SIGNATURE_OIDS.iter().find(|s| &s.oid == oid)
}

pub fn find_signature_by_algs(digest_nid: Nid, pkey_nid: Nid) -> Option<&'static SignatureOid> {
    SIGNATURE_OIDS
        .iter()
        .find(|s| s.digest_nid == digest_nid && s.pkey_nid == pkey_nid)
}

/// Key types whose signature scheme identifies no separate message digest:
/// Ed25519 and the post-quantum schemes. Their descriptors carry an absent
/// parameter.
pub fn key_implies_no_digest(pkey_nid: Nid) -> bool {
    matches!(
        pkey_nid,
        nid::ED25519
            | nid::DILITHIUM2
            | nid::DILITHIUM3
            | nid::DILITHIUM5
            | nid::FALCON512
            | nid::FALCON1024
            | nid::SPHINCS_SHA2_128F_SIMPLE
            | nid::SPHINCS_SHA2_128S_SIMPLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_lookup_round_trips() {
        for entry in SIGNATURE_OIDS {
            let found = find_signature_by_oid(&entry.oid).expect("entry by oid");
            assert_eq!(found.sig_nid, entry.sig_nid);
        }
    }

    #[test]
    fn algs_lookup_skips_undef_digests() {
        // (UNDEF, RSA) must not resolve to RSA-PSS: the encoder reaches PSS
        // through the padding mode, never through the digest table.
        let entry = find_signature_by_algs(nid::SHA256, nid::RSA_ENCRYPTION).unwrap();
        assert_eq!(entry.sig_nid, nid::SHA256_WITH_RSA_ENCRYPTION);
        assert!(find_signature_by_algs(nid::SHA256, nid::ED25519).is_none());
    }

    #[test]
    fn no_digest_set_matches_table() {
        for entry in SIGNATURE_OIDS {
            if key_implies_no_digest(entry.pkey_nid) {
                assert_eq!(entry.digest_nid, nid::UNDEF);
            }
        }
    }
}
