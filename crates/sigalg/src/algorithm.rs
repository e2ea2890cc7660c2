//! Mapping between AlgorithmIdentifier descriptors and (digest, key) pairs.
//!
//! Two directions:
//!
//! * [`signature_algorithm`] builds the descriptor a signer must emit for its
//!   (digest, key, padding) configuration.
//! * [`verification_params`] decodes a peer's descriptor against a public key
//!   and yields everything a verifier needs to initialise.
//!
//! The explicit-NULL versus absent-parameter distinction is load-bearing:
//! RSA PKCS#1 v1.5 descriptors carry an explicit ASN.1 NULL, RSA-PSS carries
//! a populated parameter structure, and Ed25519 and the post-quantum schemes
//! must have no parameter field at all.

use der::asn1::{Any, Null};

use tlskex_api::{Error, Result};
use tlskex_params::{find_signature_by_algs, find_signature_by_oid, key_implies_no_digest, nid, Nid};

use crate::digest::MessageDigest;
use crate::pss;

/// Descriptor container: an OID plus an optional ASN.1 parameter.
pub type AlgorithmIdentifier = spki::AlgorithmIdentifierOwned;

/// RSA padding modes a signing key can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaPadding {
    Pkcs1V15,
    Pss,
}

/// The signer's key as this layer sees it: a key type, plus the padding mode
/// when the type is RSA.
#[derive(Debug, Clone, Copy)]
pub struct SigningKey {
    pub pkey_nid: Nid,
    pub rsa_padding: RsaPadding,
}

impl SigningKey {
    pub fn new(pkey_nid: Nid) -> Self {
        SigningKey { pkey_nid, rsa_padding: RsaPadding::Pkcs1V15 }
    }

    pub fn rsa_pss() -> Self {
        SigningKey { pkey_nid: nid::RSA_ENCRYPTION, rsa_padding: RsaPadding::Pss }
    }
}

/// A signing configuration. Both fields start unset; using the context
/// before the relevant field is set is `ContextNotInitialised`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigningContext {
    pub key: Option<SigningKey>,
    pub digest: Option<MessageDigest>,
}

/// A peer public key as this layer sees it: only its type matters here.
#[derive(Debug, Clone, Copy)]
pub struct PublicKeyInfo {
    pub pkey_nid: Nid,
}

/// Everything a verifier needs after descriptor decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationParams {
    pub pkey_nid: Nid,
    /// `None` for the schemes that hash internally (Ed25519, PQ signatures).
    pub digest: Option<MessageDigest>,
    pub pss: Option<PssVerification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PssVerification {
    pub mgf1_digest: MessageDigest,
    pub salt_length: u32,
}

/// Builds the AlgorithmIdentifier a signer emits.
pub fn signature_algorithm(ctx: &SigningContext) -> Result<AlgorithmIdentifier> {
    let key = ctx
        .key
        .ok_or(Error::ContextNotInitialised { context: "signing key" })?;

    // RSA-PSS has its own parameter structure and ignores the OID table.
    if key.pkey_nid == nid::RSA_ENCRYPTION && key.rsa_padding == RsaPadding::Pss {
        return pss::pss_algorithm_identifier(ctx);
    }

    // Schemes that hash internally: the OID is the key type's own, and the
    // parameter field stays absent.
    if key_implies_no_digest(key.pkey_nid) {
        let entry = find_signature_by_algs(nid::UNDEF, key.pkey_nid)
            .ok_or(Error::UnknownSignatureAlgorithm)?;
        return Ok(AlgorithmIdentifier { oid: entry.oid, parameters: None });
    }

    let digest = ctx
        .digest
        .ok_or(Error::ContextNotInitialised { context: "signing digest" })?;
    let entry = find_signature_by_algs(digest.nid(), key.pkey_nid).ok_or(
        Error::DigestAndKeyTypeNotSupported { digest_nid: digest.nid(), pkey_nid: key.pkey_nid },
    )?;

    // RSA PKCS#1 v1.5 encodes an explicit NULL parameter; everything else
    // omits the field.
    let parameters = if key.pkey_nid == nid::RSA_ENCRYPTION {
        Some(
            Any::encode_from(&Null)
                .map_err(|_| Error::InvalidParameter { context: "NULL parameter" })?,
        )
    } else {
        None
    };
    Ok(AlgorithmIdentifier { oid: entry.oid, parameters })
}

/// Decodes a peer's descriptor and prepares verification parameters.
pub fn verification_params(
    descriptor: &AlgorithmIdentifier,
    public_key: &PublicKeyInfo,
) -> Result<VerificationParams> {
    let entry = find_signature_by_oid(&descriptor.oid).ok_or(Error::UnknownSignatureAlgorithm)?;

    if entry.pkey_nid != public_key.pkey_nid {
        return Err(Error::WrongPublicKeyType {
            expected: entry.pkey_nid,
            actual: public_key.pkey_nid,
        });
    }

    // An undefined digest NID marks the custom-parameter algorithms.
    if entry.digest_nid == nid::UNDEF {
        if entry.sig_nid == nid::RSASSA_PSS {
            return pss::pss_verification_params(descriptor);
        }
        if key_implies_no_digest(entry.pkey_nid) {
            if descriptor.parameters.is_some() {
                return Err(Error::InvalidParameter {
                    context: "parameter must be absent for this algorithm",
                });
            }
            return Ok(VerificationParams { pkey_nid: entry.pkey_nid, digest: None, pss: None });
        }
        return Err(Error::UnknownSignatureAlgorithm);
    }

    let digest = MessageDigest::from_nid(entry.digest_nid)
        .ok_or(Error::UnknownMessageDigest { nid: entry.digest_nid })?;
    Ok(VerificationParams { pkey_nid: entry.pkey_nid, digest: Some(digest), pss: None })
}
