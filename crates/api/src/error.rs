//! Error handling for key-share and signature-algorithm operations.
//!
//! Every failure in the subsystem is a categorised variant of [`Error`].
//! Operations that consume peer-supplied bytes additionally map to a TLS
//! alert through [`Error::alert`]: malformed peer data is `decode_error`,
//! everything else is `internal_error`. The handshake layer decides what to
//! do with the alert; nothing in this crate retries.

use core::fmt;

/// TLS alert descriptions surfaced to the handshake layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Alert {
    /// `decode_error(50)`: the peer sent something unparseable.
    DecodeError = 50,
    /// `internal_error(80)`: a local failure unrelated to peer data.
    InternalError = 80,
}

/// Primary error type for the subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Peer key material failed to parse (bad EC point, wrong KEM blob).
    BadPeerKey {
        context: &'static str,
    },

    /// Peer data had the wrong length.
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The CSPRNG failed.
    RandomGeneration {
        context: &'static str,
    },

    /// A private-key operation in the backing library failed.
    PrivateKeyOperation {
        context: &'static str,
    },

    /// An operation was called in the wrong lifecycle state
    /// (e.g. `offer` twice, `finish` without an offer).
    InvalidState {
        context: &'static str,
    },

    /// The group id names no known or enabled key-exchange method.
    UnsupportedGroup {
        group_id: u16,
    },

    /// Serialized key-share envelope could not be produced or parsed.
    Serialization {
        context: &'static str,
    },

    /// Signature OID maps to no known (digest, key) pair.
    UnknownSignatureAlgorithm,

    /// The descriptor's key type does not match the supplied public key.
    WrongPublicKeyType {
        expected: i32,
        actual: i32,
    },

    /// A digest NID with no registered digest.
    UnknownMessageDigest {
        nid: i32,
    },

    /// An AlgorithmIdentifier parameter that must be absent was present,
    /// or a present parameter failed validation.
    InvalidParameter {
        context: &'static str,
    },

    /// No signature OID is registered for this (digest, key type) pair.
    DigestAndKeyTypeNotSupported {
        digest_nid: i32,
        pkey_nid: i32,
    },

    /// A signing context was used before its key or digest was set.
    ContextNotInitialised {
        context: &'static str,
    },
}

/// Result type for the subsystem.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// The TLS alert the handshake should send for this error.
    ///
    /// Only demonstrably malformed peer input downgrades to `decode_error`;
    /// every other failure keeps the `internal_error` posture.
    pub fn alert(&self) -> Alert {
        match self {
            Error::BadPeerKey { .. } | Error::InvalidLength { .. } => Alert::DecodeError,
            _ => Alert::InternalError,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadPeerKey { context } => {
                write!(f, "bad peer key: {}", context)
            }
            Error::InvalidLength { context, expected, actual } => {
                write!(f, "{}: invalid length (expected {}, got {})", context, expected, actual)
            }
            Error::RandomGeneration { context } => {
                write!(f, "random generation failed: {}", context)
            }
            Error::PrivateKeyOperation { context } => {
                write!(f, "private key operation failed: {}", context)
            }
            Error::InvalidState { context } => {
                write!(f, "invalid key-share state: {}", context)
            }
            Error::UnsupportedGroup { group_id } => {
                write!(f, "unsupported group id {:#06x}", group_id)
            }
            Error::Serialization { context } => {
                write!(f, "serialization error: {}", context)
            }
            Error::UnknownSignatureAlgorithm => {
                write!(f, "unknown signature algorithm")
            }
            Error::WrongPublicKeyType { expected, actual } => {
                write!(f, "wrong public key type (descriptor {}, key {})", expected, actual)
            }
            Error::UnknownMessageDigest { nid } => {
                write!(f, "unknown message digest algorithm (nid {})", nid)
            }
            Error::InvalidParameter { context } => {
                write!(f, "invalid parameter: {}", context)
            }
            Error::DigestAndKeyTypeNotSupported { digest_nid, pkey_nid } => {
                write!(f, "digest and key type not supported (digest nid {}, key nid {})", digest_nid, pkey_nid)
            }
            Error::ContextNotInitialised { context } => {
                write!(f, "context not initialised: {}", context)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_data_errors_map_to_decode_error() {
        let err = Error::BadPeerKey { context: "test" };
        assert_eq!(err.alert(), Alert::DecodeError);

        let err = Error::InvalidLength { context: "test", expected: 32, actual: 31 };
        assert_eq!(err.alert(), Alert::DecodeError);
    }

    #[test]
    fn local_failures_map_to_internal_error() {
        assert_eq!(Error::RandomGeneration { context: "t" }.alert(), Alert::InternalError);
        assert_eq!(Error::PrivateKeyOperation { context: "t" }.alert(), Alert::InternalError);
        assert_eq!(Error::UnsupportedGroup { group_id: 0xffff }.alert(), Alert::InternalError);
        assert_eq!(Error::Serialization { context: "t" }.alert(), Alert::InternalError);
    }

    #[test]
    fn alert_codes_match_tls_registry() {
        assert_eq!(Alert::DecodeError as u8, 50);
        assert_eq!(Alert::InternalError as u8, 80);
    }
}
