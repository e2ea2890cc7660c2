//! ASN.1 object identifiers for signature algorithms, key types and digests.
//!
//! Post-quantum signature OIDs use the arcs the OQS interop profile assigns;
//! everything else is the standard registry value.

use const_oid::ObjectIdentifier;

// Public-key types.
pub const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

// RSA PKCS#1 v1.5 signatures.
pub const SHA1_WITH_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.5");
pub const SHA224_WITH_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.14");
pub const SHA256_WITH_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.11");
pub const SHA384_WITH_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.12");
pub const SHA512_WITH_RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.13");

// RSASSA-PSS and its mask generation function.
pub const RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");
pub const MGF1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");

// ECDSA signatures.
pub const ECDSA_WITH_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.1");
pub const ECDSA_WITH_SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.1");
pub const ECDSA_WITH_SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.2");
pub const ECDSA_WITH_SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.3");
pub const ECDSA_WITH_SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.4.3.4");

// Message digests.
pub const SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
pub const SHA224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.4");
pub const SHA256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.1");
pub const SHA384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.2");
pub const SHA512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.3");

// Post-quantum signature schemes.
pub const DILITHIUM2: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.2.267.7.4.4");
pub const DILITHIUM3: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.2.267.7.6.5");
pub const DILITHIUM5: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.6.1.4.1.2.267.7.8.7");
pub const FALCON512: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.9999.3.6");
pub const FALCON1024: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.9999.3.9");
pub const SPHINCS_SHA2_128F_SIMPLE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.9999.6.4.13");
pub const SPHINCS_SHA2_128S_SIMPLE: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.9999.6.4.16");
