//! End-to-end key-share negotiation across every registered group.

use rand::rngs::OsRng;
use tlskex::prelude::*;
use tlskex::params::groups::{group, hrss};

/// Offer → Accept → Finish must agree byte-for-byte for every group the
/// backing libraries make available.
#[test]
fn every_available_group_agrees() {
    let mut negotiated = 0;
    for entry in NAMED_GROUPS {
        let Some(mut client) = KeyShare::create(entry.group_id) else {
            continue;
        };
        let mut server = KeyShare::create(entry.group_id).expect("availability is stable");

        let offer = client.offer(&mut OsRng).expect(entry.name);
        let (reply, server_secret) = server.accept(&mut OsRng, &offer).expect(entry.name);
        let client_secret = client.finish(&reply).expect(entry.name);

        assert_eq!(
            client_secret.as_bytes(),
            server_secret.as_bytes(),
            "secret mismatch for {}",
            entry.name
        );
        negotiated += 1;
    }
    // The classical groups carry no availability condition.
    assert!(negotiated >= 5);
}

#[test]
fn classical_secret_widths_match_the_curve() {
    for (group_id, expected) in [
        (group::SECP224R1, 28),
        (group::SECP256R1, 32),
        (group::SECP384R1, 48),
        (group::SECP521R1, 66),
        (group::X25519, 32),
    ] {
        let mut client = KeyShare::create(group_id).unwrap();
        let mut server = KeyShare::create(group_id).unwrap();
        let offer = client.offer(&mut OsRng).unwrap();
        let (reply, _) = server.accept(&mut OsRng, &offer).unwrap();
        let secret = client.finish(&reply).unwrap();
        assert_eq!(secret.len(), expected);
    }
}

#[test]
fn cecpq2_secret_is_x25519_then_hrss() {
    let Some(mut client) = KeyShare::create(group::CECPQ2) else {
        return; // library built without NTRU-HRSS
    };
    let mut server = KeyShare::create(group::CECPQ2).unwrap();

    let offer = client.offer(&mut OsRng).unwrap();
    assert_eq!(offer.len(), 32 + hrss::PUBLIC_KEY_BYTES);

    let (reply, server_secret) = server.accept(&mut OsRng, &offer).unwrap();
    assert_eq!(reply.len(), 32 + hrss::CIPHERTEXT_BYTES);

    let client_secret = client.finish(&reply).unwrap();
    assert_eq!(client_secret.len(), 32 + hrss::KEY_BYTES);
    assert_eq!(client_secret.as_bytes(), server_secret.as_bytes());
}

/// The hybrid reply for p256_kyber512 frames a 65-byte uncompressed P-256
/// point, then a Kyber-512 ciphertext (768 bytes).
#[test]
fn p256_kyber512_reply_framing() {
    let Some(mut client) = KeyShare::create(group::P256_KYBER512) else {
        return; // library built without Kyber
    };
    let mut server = KeyShare::create(group::P256_KYBER512).unwrap();

    let offer = client.offer(&mut OsRng).unwrap();
    let (reply, _) = server.accept(&mut OsRng, &offer).unwrap();

    let classical_len = usize::from(u16::from_be_bytes([reply[0], reply[1]]));
    assert_eq!(classical_len, 65);
    assert_eq!(reply[2], 0x04);

    let pq_offset = 2 + classical_len;
    let pq_len = usize::from(u16::from_be_bytes([reply[pq_offset], reply[pq_offset + 1]]));
    assert_eq!(pq_len, 768);
    assert_eq!(reply.len(), 2 + classical_len + 2 + pq_len);
}

#[test]
fn factory_refuses_unknown_groups_but_always_serves_classical_ones() {
    assert!(KeyShare::create(0x0100).is_none());
    assert!(KeyShare::create(0xFFFF).is_none());
    assert!(KeyShare::create(group::X25519).is_some());
    assert!(KeyShare::create(group::SECP256R1).is_some());
}

#[test]
fn wrong_length_peer_data_raises_decode_error_alerts() {
    let mut share = KeyShare::create(group::X25519).unwrap();
    share.offer(&mut OsRng).unwrap();
    assert_eq!(share.finish(&[0u8; 16]).unwrap_err().alert(), Alert::DecodeError);

    let mut share = KeyShare::create(group::SECP256R1).unwrap();
    share.offer(&mut OsRng).unwrap();
    assert_eq!(share.finish(&[0x04; 64]).unwrap_err().alert(), Alert::DecodeError);

    if let Some(mut share) = KeyShare::create(group::P256_KYBER512) {
        assert_eq!(
            share.accept(&mut OsRng, &[0u8; 7]).unwrap_err().alert(),
            Alert::DecodeError
        );
    }
}

#[test]
fn offered_shares_survive_the_serialized_round_trip() {
    for group_id in [group::SECP256R1, group::SECP521R1, group::X25519] {
        let mut original = KeyShare::create(group_id).unwrap();
        original.offer(&mut OsRng).unwrap();
        let envelope = original.serialize().unwrap();

        let mut restored = KeyShare::create_from_serialized(&envelope).unwrap();
        assert_eq!(restored.group_id(), group_id);

        let mut peer = KeyShare::create(group_id).unwrap();
        let peer_offer = peer.offer(&mut OsRng).unwrap();
        assert_eq!(
            original.finish(&peer_offer).unwrap().as_bytes(),
            restored.finish(&peer_offer).unwrap().as_bytes()
        );
    }
}

#[test]
fn registry_lookups_round_trip() {
    for entry in NAMED_GROUPS {
        assert_eq!(name_for_group_id(entry.group_id), Some(entry.name));
        assert_eq!(group_id_for_name(entry.name), Some(entry.group_id));
        assert_eq!(group_id_for_name(entry.alias), Some(entry.group_id));
        assert_eq!(group_id_for_nid(entry.nid), Some(entry.group_id));
    }
    assert_eq!(group_id_for_name("p-256"), None);
    assert_eq!(name_for_group_id(0x0666), None);
}
