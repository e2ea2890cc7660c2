//! RSASSA-PSS parameter handling.
//!
//! ```text
//! RSASSA-PSS-params ::= SEQUENCE {
//!   hashAlgorithm    [0] EXPLICIT AlgorithmIdentifier DEFAULT sha1,
//!   maskGenAlgorithm [1] EXPLICIT AlgorithmIdentifier DEFAULT mgf1SHA1,
//!   saltLength       [2] EXPLICIT INTEGER DEFAULT 20,
//!   trailerField     [3] EXPLICIT INTEGER DEFAULT 1
//! }
//! ```
//!
//! DEFAULT-valued fields are omitted on encode, per DER.

use der::asn1::{Any, ObjectIdentifier};
use der::Sequence;

use tlskex_api::{Error, Result};
use tlskex_params::{nid, oid};

use crate::algorithm::{AlgorithmIdentifier, PssVerification, SigningContext, VerificationParams};
use crate::digest::MessageDigest;

/// `MGF1 { parameters: AlgorithmIdentifier }` — the mask generation function
/// field of the PSS parameter structure.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct MaskGenAlgorithm {
    pub oid: ObjectIdentifier,
    pub parameters: AlgorithmIdentifier,
}

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RsaPssParams {
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", default = "sha1_identifier")]
    pub hash_algorithm: AlgorithmIdentifier,
    #[asn1(context_specific = "1", tag_mode = "EXPLICIT", default = "mgf1_sha1_identifier")]
    pub mask_gen_algorithm: MaskGenAlgorithm,
    #[asn1(context_specific = "2", tag_mode = "EXPLICIT", default = "default_salt_length")]
    pub salt_length: u32,
    #[asn1(context_specific = "3", tag_mode = "EXPLICIT", default = "default_trailer_field")]
    pub trailer_field: u32,
}

fn sha1_identifier() -> AlgorithmIdentifier {
    AlgorithmIdentifier { oid: oid::SHA1, parameters: None }
}

fn mgf1_sha1_identifier() -> MaskGenAlgorithm {
    MaskGenAlgorithm { oid: oid::MGF1, parameters: sha1_identifier() }
}

fn default_salt_length() -> u32 {
    20
}

fn default_trailer_field() -> u32 {
    1
}

/// Builds the signing-side descriptor: a fully populated parameter structure
/// with the context's digest for both the hash and the MGF, and the digest
/// length as the salt length.
pub(crate) fn pss_algorithm_identifier(ctx: &SigningContext) -> Result<AlgorithmIdentifier> {
    let digest = ctx
        .digest
        .ok_or(Error::ContextNotInitialised { context: "signing digest" })?;
    let hash_algorithm = AlgorithmIdentifier { oid: digest.oid(), parameters: None };
    let params = RsaPssParams {
        hash_algorithm: hash_algorithm.clone(),
        mask_gen_algorithm: MaskGenAlgorithm { oid: oid::MGF1, parameters: hash_algorithm },
        salt_length: digest.output_len() as u32,
        trailer_field: 1,
    };
    let parameters = Any::encode_from(&params)
        .map_err(|_| Error::InvalidParameter { context: "RSASSA-PSS parameters" })?;
    Ok(AlgorithmIdentifier { oid: oid::RSASSA_PSS, parameters: Some(parameters) })
}

/// Decodes and validates the verification-side parameters. The key-type
/// check has already happened in the caller.
pub(crate) fn pss_verification_params(
    descriptor: &AlgorithmIdentifier,
) -> Result<VerificationParams> {
    let parameters = descriptor
        .parameters
        .as_ref()
        .ok_or(Error::InvalidParameter { context: "RSASSA-PSS parameters missing" })?;
    let params: RsaPssParams = parameters
        .decode_as()
        .map_err(|_| Error::InvalidParameter { context: "RSASSA-PSS parameters" })?;

    let digest = MessageDigest::from_oid(&params.hash_algorithm.oid)
        .ok_or(Error::InvalidParameter { context: "RSASSA-PSS hash algorithm" })?;

    if params.mask_gen_algorithm.oid != oid::MGF1 {
        return Err(Error::InvalidParameter { context: "RSASSA-PSS mask generation function" });
    }
    let mgf1_digest = MessageDigest::from_oid(&params.mask_gen_algorithm.parameters.oid)
        .ok_or(Error::InvalidParameter { context: "RSASSA-PSS MGF1 hash algorithm" })?;

    if params.trailer_field != 1 {
        return Err(Error::InvalidParameter { context: "RSASSA-PSS trailer field" });
    }

    Ok(VerificationParams {
        pkey_nid: nid::RSA_ENCRYPTION,
        digest: Some(digest),
        pss: Some(PssVerification { mgf1_digest, salt_length: params.salt_length }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::{Decode, Encode};

    #[test]
    fn all_default_params_encode_as_an_empty_sequence() {
        let params = RsaPssParams {
            hash_algorithm: sha1_identifier(),
            mask_gen_algorithm: mgf1_sha1_identifier(),
            salt_length: 20,
            trailer_field: 1,
        };
        assert_eq!(params.to_der().unwrap(), vec![0x30, 0x00]);
    }

    #[test]
    fn sha256_params_round_trip() {
        let hash = AlgorithmIdentifier { oid: oid::SHA256, parameters: None };
        let params = RsaPssParams {
            hash_algorithm: hash.clone(),
            mask_gen_algorithm: MaskGenAlgorithm { oid: oid::MGF1, parameters: hash },
            salt_length: 32,
            trailer_field: 1,
        };
        let encoded = params.to_der().unwrap();
        let decoded = RsaPssParams::from_der(&encoded).unwrap();
        assert_eq!(decoded, params);
        assert_eq!(decoded.salt_length, 32);
    }

    #[test]
    fn decoding_an_empty_sequence_applies_the_sha1_defaults() {
        let decoded = RsaPssParams::from_der(&[0x30, 0x00]).unwrap();
        assert_eq!(decoded.hash_algorithm.oid, oid::SHA1);
        assert_eq!(decoded.mask_gen_algorithm.oid, oid::MGF1);
        assert_eq!(decoded.salt_length, 20);
        assert_eq!(decoded.trailer_field, 1);
    }
}
