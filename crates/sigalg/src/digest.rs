//! Message digests named by signature algorithms.

use der::asn1::ObjectIdentifier;

use tlskex_params::{nid, oid, Nid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDigest {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl MessageDigest {
    pub fn nid(self) -> Nid {
        match self {
            MessageDigest::Sha1 => nid::SHA1,
            MessageDigest::Sha224 => nid::SHA224,
            MessageDigest::Sha256 => nid::SHA256,
            MessageDigest::Sha384 => nid::SHA384,
            MessageDigest::Sha512 => nid::SHA512,
        }
    }

    pub fn oid(self) -> ObjectIdentifier {
        match self {
            MessageDigest::Sha1 => oid::SHA1,
            MessageDigest::Sha224 => oid::SHA224,
            MessageDigest::Sha256 => oid::SHA256,
            MessageDigest::Sha384 => oid::SHA384,
            MessageDigest::Sha512 => oid::SHA512,
        }
    }

    pub fn output_len(self) -> usize {
        match self {
            MessageDigest::Sha1 => 20,
            MessageDigest::Sha224 => 28,
            MessageDigest::Sha256 => 32,
            MessageDigest::Sha384 => 48,
            MessageDigest::Sha512 => 64,
        }
    }

    pub fn from_nid(nid: Nid) -> Option<Self> {
        match nid {
            nid::SHA1 => Some(MessageDigest::Sha1),
            nid::SHA224 => Some(MessageDigest::Sha224),
            nid::SHA256 => Some(MessageDigest::Sha256),
            nid::SHA384 => Some(MessageDigest::Sha384),
            nid::SHA512 => Some(MessageDigest::Sha512),
            _ => None,
        }
    }

    pub fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [
            MessageDigest::Sha1,
            MessageDigest::Sha224,
            MessageDigest::Sha256,
            MessageDigest::Sha384,
            MessageDigest::Sha512,
        ]
        .into_iter()
        .find(|digest| &digest.oid() == oid)
    }
}
