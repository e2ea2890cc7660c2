//! The named-group registry and its lookup helpers.
//!
//! One immutable table maps the 16-bit wire group id to the local NID, the
//! printable names, and the recipe the factory uses to instantiate a backend.
//! Lookups are linear scans: the table is small and each lookup happens about
//! once per handshake.

use crate::nid::{self, Nid};

/// Group ids as they appear in the TLS `supported_groups` extension.
///
/// Classical ids are the IANA assignments. Post-quantum ids use the OQS
/// interop block: `0x02xx` for pure KEM groups and `0x2Fxx` (same low byte)
/// for the paired classical+PQ hybrids.
pub mod group {
    pub const SECP224R1: u16 = 21;
    pub const SECP256R1: u16 = 23;
    pub const SECP384R1: u16 = 24;
    pub const SECP521R1: u16 = 25;
    pub const X25519: u16 = 29;
    pub const CECPQ2: u16 = 0x4138;

    pub const FRODO640AES: u16 = 0x0200;
    pub const P256_FRODO640AES: u16 = 0x2F00;
    pub const FRODO640SHAKE: u16 = 0x0201;
    pub const P256_FRODO640SHAKE: u16 = 0x2F01;
    pub const FRODO976AES: u16 = 0x0202;
    pub const P384_FRODO976AES: u16 = 0x2F02;
    pub const FRODO976SHAKE: u16 = 0x0203;
    pub const P384_FRODO976SHAKE: u16 = 0x2F03;
    pub const FRODO1344AES: u16 = 0x0204;
    pub const P521_FRODO1344AES: u16 = 0x2F04;
    pub const FRODO1344SHAKE: u16 = 0x0205;
    pub const P521_FRODO1344SHAKE: u16 = 0x2F05;

    pub const NTRU_HPS2048509: u16 = 0x0214;
    pub const P256_NTRU_HPS2048509: u16 = 0x2F14;
    pub const NTRU_HPS2048677: u16 = 0x0215;
    pub const P384_NTRU_HPS2048677: u16 = 0x2F15;
    pub const NTRU_HPS4096821: u16 = 0x0216;
    pub const P521_NTRU_HPS4096821: u16 = 0x2F16;
    pub const NTRU_HRSS701: u16 = 0x0217;
    pub const P384_NTRU_HRSS701: u16 = 0x2F17;

    pub const LIGHTSABER: u16 = 0x0218;
    pub const P256_LIGHTSABER: u16 = 0x2F18;
    pub const SABER: u16 = 0x0219;
    pub const P384_SABER: u16 = 0x2F19;
    pub const FIRESABER: u16 = 0x021A;
    pub const P521_FIRESABER: u16 = 0x2F1A;

    pub const KYBER512: u16 = 0x023A;
    pub const P256_KYBER512: u16 = 0x2F3A;
    pub const KYBER768: u16 = 0x023C;
    pub const P384_KYBER768: u16 = 0x2F3C;
    pub const KYBER1024: u16 = 0x023D;
    pub const P521_KYBER1024: u16 = 0x2F3D;
    pub const KYBER90S512: u16 = 0x023E;
    pub const P256_KYBER90S512: u16 = 0x2F3E;
    pub const KYBER90S768: u16 = 0x023F;
    pub const P384_KYBER90S768: u16 = 0x2F3F;
    pub const KYBER90S1024: u16 = 0x0240;
    pub const P521_KYBER90S1024: u16 = 0x2F40;
}

/// NTRU-HRSS-701 sizes, fixed by the algorithm. CECPQ2 concatenates fields
/// without length prefixes, so these widths are part of its wire format.
pub mod hrss {
    pub const PUBLIC_KEY_BYTES: usize = 1138;
    pub const CIPHERTEXT_BYTES: usize = 1138;
    pub const KEY_BYTES: usize = 32;
}

/// A named prime-order curve usable as the classical half of a key exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveId {
    Secp224r1,
    Secp256r1,
    Secp384r1,
    Secp521r1,
}

impl CurveId {
    pub fn nid(self) -> Nid {
        match self {
            CurveId::Secp224r1 => nid::SECP224R1,
            CurveId::Secp256r1 => nid::X9_62_PRIME256V1,
            CurveId::Secp384r1 => nid::SECP384R1,
            CurveId::Secp521r1 => nid::SECP521R1,
        }
    }

    pub fn group_id(self) -> u16 {
        match self {
            CurveId::Secp224r1 => group::SECP224R1,
            CurveId::Secp256r1 => group::SECP256R1,
            CurveId::Secp384r1 => group::SECP384R1,
            CurveId::Secp521r1 => group::SECP521R1,
        }
    }

    /// ceil(field_bits / 8): the width of one coordinate and of the shared
    /// secret.
    pub fn field_bytes(self) -> usize {
        match self {
            CurveId::Secp224r1 => 28,
            CurveId::Secp256r1 => 32,
            CurveId::Secp384r1 => 48,
            CurveId::Secp521r1 => 66,
        }
    }

    /// Length of a SEC1 uncompressed point: `0x04 ‖ X ‖ Y`.
    pub fn uncompressed_point_bytes(self) -> usize {
        1 + 2 * self.field_bytes()
    }
}

/// A post-quantum KEM, named the way the backing library names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PqAlgorithmId {
    Frodo640Aes,
    Frodo640Shake,
    Frodo976Aes,
    Frodo976Shake,
    Frodo1344Aes,
    Frodo1344Shake,
    NtruHps2048509,
    NtruHps2048677,
    NtruHps4096821,
    NtruHrss701,
    Lightsaber,
    Saber,
    FireSaber,
    Kyber512,
    Kyber768,
    Kyber1024,
    Kyber90s512,
    Kyber90s768,
    Kyber90s1024,
}

impl PqAlgorithmId {
    /// The textual algorithm name in the KEM library.
    pub fn name(self) -> &'static str {
        match self {
            PqAlgorithmId::Frodo640Aes => "FrodoKEM-640-AES",
            PqAlgorithmId::Frodo640Shake => "FrodoKEM-640-SHAKE",
            PqAlgorithmId::Frodo976Aes => "FrodoKEM-976-AES",
            PqAlgorithmId::Frodo976Shake => "FrodoKEM-976-SHAKE",
            PqAlgorithmId::Frodo1344Aes => "FrodoKEM-1344-AES",
            PqAlgorithmId::Frodo1344Shake => "FrodoKEM-1344-SHAKE",
            PqAlgorithmId::NtruHps2048509 => "NTRU-HPS-2048-509",
            PqAlgorithmId::NtruHps2048677 => "NTRU-HPS-2048-677",
            PqAlgorithmId::NtruHps4096821 => "NTRU-HPS-4096-821",
            PqAlgorithmId::NtruHrss701 => "NTRU-HRSS-701",
            PqAlgorithmId::Lightsaber => "LightSaber-KEM",
            PqAlgorithmId::Saber => "Saber-KEM",
            PqAlgorithmId::FireSaber => "FireSaber-KEM",
            PqAlgorithmId::Kyber512 => "Kyber512",
            PqAlgorithmId::Kyber768 => "Kyber768",
            PqAlgorithmId::Kyber1024 => "Kyber1024",
            PqAlgorithmId::Kyber90s512 => "Kyber512-90s",
            PqAlgorithmId::Kyber90s768 => "Kyber768-90s",
            PqAlgorithmId::Kyber90s1024 => "Kyber1024-90s",
        }
    }
}

/// How the factory instantiates a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Interactive ECDH over a named curve.
    Curve(CurveId),
    /// Interactive DH over Curve25519.
    X25519,
    /// The bespoke X25519+HRSS construction.
    Cecpq2,
    /// A pure post-quantum KEM.
    PostQuantum(PqAlgorithmId),
    /// Length-prefixed (classical ‖ PQ) hybrid.
    Hybrid(CurveId, PqAlgorithmId),
}

/// One registry entry.
#[derive(Debug, Clone, Copy)]
pub struct NamedGroup {
    pub nid: Nid,
    pub group_id: u16,
    /// The canonical printable name; `name_for_group_id` returns this one.
    pub name: &'static str,
    pub alias: &'static str,
    pub kind: GroupKind,
}

/// The registry. Group ids are unique; order is the probe order for name
/// lookups.
pub static NAMED_GROUPS: &[NamedGroup] = &[
    NamedGroup { nid: nid::SECP224R1, group_id: group::SECP224R1, name: "P-224", alias: "secp224r1", kind: GroupKind::Curve(CurveId::Secp224r1) },
    NamedGroup { nid: nid::X9_62_PRIME256V1, group_id: group::SECP256R1, name: "P-256", alias: "prime256v1", kind: GroupKind::Curve(CurveId::Secp256r1) },
    NamedGroup { nid: nid::SECP384R1, group_id: group::SECP384R1, name: "P-384", alias: "secp384r1", kind: GroupKind::Curve(CurveId::Secp384r1) },
    NamedGroup { nid: nid::SECP521R1, group_id: group::SECP521R1, name: "P-521", alias: "secp521r1", kind: GroupKind::Curve(CurveId::Secp521r1) },
    NamedGroup { nid: nid::X25519, group_id: group::X25519, name: "X25519", alias: "x25519", kind: GroupKind::X25519 },
    NamedGroup { nid: nid::CECPQ2, group_id: group::CECPQ2, name: "CECPQ2", alias: "CECPQ2", kind: GroupKind::Cecpq2 },
    NamedGroup { nid: nid::FRODO640AES, group_id: group::FRODO640AES, name: "frodo640aes", alias: "frodo640aes", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo640Aes) },
    NamedGroup { nid: nid::P256_FRODO640AES, group_id: group::P256_FRODO640AES, name: "p256_frodo640aes", alias: "p256_frodo640aes", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::Frodo640Aes) },
    NamedGroup { nid: nid::FRODO640SHAKE, group_id: group::FRODO640SHAKE, name: "frodo640shake", alias: "frodo640shake", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo640Shake) },
    NamedGroup { nid: nid::P256_FRODO640SHAKE, group_id: group::P256_FRODO640SHAKE, name: "p256_frodo640shake", alias: "p256_frodo640shake", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::Frodo640Shake) },
    NamedGroup { nid: nid::FRODO976AES, group_id: group::FRODO976AES, name: "frodo976aes", alias: "frodo976aes", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo976Aes) },
    NamedGroup { nid: nid::P384_FRODO976AES, group_id: group::P384_FRODO976AES, name: "p384_frodo976aes", alias: "p384_frodo976aes", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::Frodo976Aes) },
    NamedGroup { nid: nid::FRODO976SHAKE, group_id: group::FRODO976SHAKE, name: "frodo976shake", alias: "frodo976shake", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo976Shake) },
    NamedGroup { nid: nid::P384_FRODO976SHAKE, group_id: group::P384_FRODO976SHAKE, name: "p384_frodo976shake", alias: "p384_frodo976shake", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::Frodo976Shake) },
    NamedGroup { nid: nid::FRODO1344AES, group_id: group::FRODO1344AES, name: "frodo1344aes", alias: "frodo1344aes", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo1344Aes) },
    NamedGroup { nid: nid::P521_FRODO1344AES, group_id: group::P521_FRODO1344AES, name: "p521_frodo1344aes", alias: "p521_frodo1344aes", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::Frodo1344Aes) },
    NamedGroup { nid: nid::FRODO1344SHAKE, group_id: group::FRODO1344SHAKE, name: "frodo1344shake", alias: "frodo1344shake", kind: GroupKind::PostQuantum(PqAlgorithmId::Frodo1344Shake) },
    NamedGroup { nid: nid::P521_FRODO1344SHAKE, group_id: group::P521_FRODO1344SHAKE, name: "p521_frodo1344shake", alias: "p521_frodo1344shake", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::Frodo1344Shake) },
    NamedGroup { nid: nid::NTRU_HPS2048509, group_id: group::NTRU_HPS2048509, name: "ntru_hps2048509", alias: "ntru_hps2048509", kind: GroupKind::PostQuantum(PqAlgorithmId::NtruHps2048509) },
    NamedGroup { nid: nid::P256_NTRU_HPS2048509, group_id: group::P256_NTRU_HPS2048509, name: "p256_ntru_hps2048509", alias: "p256_ntru_hps2048509", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::NtruHps2048509) },
    NamedGroup { nid: nid::NTRU_HPS2048677, group_id: group::NTRU_HPS2048677, name: "ntru_hps2048677", alias: "ntru_hps2048677", kind: GroupKind::PostQuantum(PqAlgorithmId::NtruHps2048677) },
    NamedGroup { nid: nid::P384_NTRU_HPS2048677, group_id: group::P384_NTRU_HPS2048677, name: "p384_ntru_hps2048677", alias: "p384_ntru_hps2048677", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::NtruHps2048677) },
    NamedGroup { nid: nid::NTRU_HPS4096821, group_id: group::NTRU_HPS4096821, name: "ntru_hps4096821", alias: "ntru_hps4096821", kind: GroupKind::PostQuantum(PqAlgorithmId::NtruHps4096821) },
    NamedGroup { nid: nid::P521_NTRU_HPS4096821, group_id: group::P521_NTRU_HPS4096821, name: "p521_ntru_hps4096821", alias: "p521_ntru_hps4096821", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::NtruHps4096821) },
    NamedGroup { nid: nid::NTRU_HRSS701, group_id: group::NTRU_HRSS701, name: "ntru_hrss701", alias: "ntru_hrss701", kind: GroupKind::PostQuantum(PqAlgorithmId::NtruHrss701) },
    NamedGroup { nid: nid::P384_NTRU_HRSS701, group_id: group::P384_NTRU_HRSS701, name: "p384_ntru_hrss701", alias: "p384_ntru_hrss701", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::NtruHrss701) },
    NamedGroup { nid: nid::LIGHTSABER, group_id: group::LIGHTSABER, name: "lightsaber", alias: "lightsaber", kind: GroupKind::PostQuantum(PqAlgorithmId::Lightsaber) },
    NamedGroup { nid: nid::P256_LIGHTSABER, group_id: group::P256_LIGHTSABER, name: "p256_lightsaber", alias: "p256_lightsaber", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::Lightsaber) },
    NamedGroup { nid: nid::SABER, group_id: group::SABER, name: "saber", alias: "saber", kind: GroupKind::PostQuantum(PqAlgorithmId::Saber) },
    NamedGroup { nid: nid::P384_SABER, group_id: group::P384_SABER, name: "p384_saber", alias: "p384_saber", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::Saber) },
    NamedGroup { nid: nid::FIRESABER, group_id: group::FIRESABER, name: "firesaber", alias: "firesaber", kind: GroupKind::PostQuantum(PqAlgorithmId::FireSaber) },
    NamedGroup { nid: nid::P521_FIRESABER, group_id: group::P521_FIRESABER, name: "p521_firesaber", alias: "p521_firesaber", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::FireSaber) },
    NamedGroup { nid: nid::KYBER512, group_id: group::KYBER512, name: "kyber512", alias: "kyber512", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber512) },
    NamedGroup { nid: nid::P256_KYBER512, group_id: group::P256_KYBER512, name: "p256_kyber512", alias: "p256_kyber512", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::Kyber512) },
    NamedGroup { nid: nid::KYBER768, group_id: group::KYBER768, name: "kyber768", alias: "kyber768", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber768) },
    NamedGroup { nid: nid::P384_KYBER768, group_id: group::P384_KYBER768, name: "p384_kyber768", alias: "p384_kyber768", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::Kyber768) },
    NamedGroup { nid: nid::KYBER1024, group_id: group::KYBER1024, name: "kyber1024", alias: "kyber1024", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber1024) },
    NamedGroup { nid: nid::P521_KYBER1024, group_id: group::P521_KYBER1024, name: "p521_kyber1024", alias: "p521_kyber1024", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::Kyber1024) },
    NamedGroup { nid: nid::KYBER90S512, group_id: group::KYBER90S512, name: "kyber90s512", alias: "kyber90s512", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber90s512) },
    NamedGroup { nid: nid::P256_KYBER90S512, group_id: group::P256_KYBER90S512, name: "p256_kyber90s512", alias: "p256_kyber90s512", kind: GroupKind::Hybrid(CurveId::Secp256r1, PqAlgorithmId::Kyber90s512) },
    NamedGroup { nid: nid::KYBER90S768, group_id: group::KYBER90S768, name: "kyber90s768", alias: "kyber90s768", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber90s768) },
    NamedGroup { nid: nid::P384_KYBER90S768, group_id: group::P384_KYBER90S768, name: "p384_kyber90s768", alias: "p384_kyber90s768", kind: GroupKind::Hybrid(CurveId::Secp384r1, PqAlgorithmId::Kyber90s768) },
    NamedGroup { nid: nid::KYBER90S1024, group_id: group::KYBER90S1024, name: "kyber90s1024", alias: "kyber90s1024", kind: GroupKind::PostQuantum(PqAlgorithmId::Kyber90s1024) },
    NamedGroup { nid: nid::P521_KYBER90S1024, group_id: group::P521_KYBER90S1024, name: "p521_kyber90s1024", alias: "p521_kyber90s1024", kind: GroupKind::Hybrid(CurveId::Secp521r1, PqAlgorithmId::Kyber90s1024) },
];

/// Full registry record for a wire group id.
pub fn find_group(group_id: u16) -> Option<&'static NamedGroup> {
    NAMED_GROUPS.iter().find(|g| g.group_id == group_id)
}

pub fn group_id_for_nid(nid: Nid) -> Option<u16> {
    NAMED_GROUPS.iter().find(|g| g.nid == nid).map(|g| g.group_id)
}

/// Case-sensitive exact match, canonical name first, then alias, in table
/// order.
pub fn group_id_for_name(name: &str) -> Option<u16> {
    for group in NAMED_GROUPS {
        if group.name.as_bytes() == name.as_bytes() || group.alias.as_bytes() == name.as_bytes() {
            return Some(group.group_id);
        }
    }
    None
}

/// The canonical name (never the alias).
pub fn name_for_group_id(group_id: u16) -> Option<&'static str> {
    find_group(group_id).map(|g| g.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn group_ids_are_unique() {
        let mut seen = HashSet::new();
        for group in NAMED_GROUPS {
            assert!(seen.insert(group.group_id), "duplicate group id {:#06x}", group.group_id);
        }
    }

    #[test]
    fn lookups_round_trip_for_every_entry() {
        for group in NAMED_GROUPS {
            assert_eq!(name_for_group_id(group.group_id), Some(group.name));
            assert_eq!(group_id_for_name(group.name), Some(group.group_id));
            assert_eq!(group_id_for_name(group.alias), Some(group.group_id));
            assert_eq!(group_id_for_nid(group.nid), Some(group.group_id));
        }
    }

    #[test]
    fn name_lookup_is_exact_and_case_sensitive() {
        assert_eq!(group_id_for_name("P-256"), Some(group::SECP256R1));
        assert_eq!(group_id_for_name("p-256"), None);
        assert_eq!(group_id_for_name("P-25"), None);
        assert_eq!(group_id_for_name("P-2566"), None);
        assert_eq!(group_id_for_name(""), None);
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        // "x25519" is an alias; the canonical name is returned on reverse
        // lookup regardless of which one was used.
        let id = group_id_for_name("x25519").unwrap();
        assert_eq!(name_for_group_id(id), Some("X25519"));
    }

    #[test]
    fn unknown_identifiers_yield_none() {
        assert_eq!(find_group(0xFFFF).map(|g| g.group_id), None);
        assert_eq!(group_id_for_nid(-1), None);
        assert_eq!(name_for_group_id(0x0777), None);
    }

    #[test]
    fn hybrid_entries_share_the_low_byte_with_their_pq_half() {
        for group in NAMED_GROUPS {
            if let GroupKind::Hybrid(_, pq) = group.kind {
                let pure = NAMED_GROUPS
                    .iter()
                    .find(|g| g.kind == GroupKind::PostQuantum(pq))
                    .expect("every hybrid has a pure counterpart");
                assert_eq!(group.group_id & 0xFF, pure.group_id & 0xFF);
                assert_eq!(group.group_id & 0xFF00, 0x2F00);
            }
        }
    }
}
