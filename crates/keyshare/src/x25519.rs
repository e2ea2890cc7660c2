//! X25519 key shares.
//!
//! Fixed 32-byte private key, offer, peer key and shared secret.

use rand::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, Zeroizing};

use tlskex_api::{Error, Result, SharedSecret};
use tlskex_params::groups::group;

use crate::serialize;

pub const KEY_BYTES: usize = 32;

pub struct X25519KeyShare {
    private_key: Option<StaticSecret>,
}

impl X25519KeyShare {
    pub(crate) fn new() -> Self {
        X25519KeyShare { private_key: None }
    }

    pub fn group_id(&self) -> u16 {
        group::X25519
    }

    pub fn offer<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        if self.private_key.is_some() {
            return Err(Error::InvalidState { context: "offer on a share that already holds a key" });
        }
        let mut bytes = [0u8; KEY_BYTES];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|_| Error::RandomGeneration { context: "X25519 private key" })?;
        let private_key = StaticSecret::from(bytes);
        bytes.zeroize();
        let public_key = PublicKey::from(&private_key);
        self.private_key = Some(private_key);
        Ok(public_key.as_bytes().to_vec())
    }

    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "finish before offer or deserialize" })?;

        let peer_key: [u8; KEY_BYTES] = peer_key.try_into().map_err(|_| Error::InvalidLength {
            context: "X25519 peer key",
            expected: KEY_BYTES,
            actual: peer_key.len(),
        })?;

        let shared = private_key.diffie_hellman(&PublicKey::from(peer_key));
        // An all-zero output means the peer sent a low-order point.
        if !shared.was_contributory() {
            return Err(Error::BadPeerKey { context: "X25519 peer key" });
        }
        self.private_key = None;
        Ok(SharedSecret::new(shared.as_bytes().to_vec()))
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "serialize before offer" })?;
        let key = Zeroizing::new(private_key.to_bytes());
        serialize::encode_envelope(self.group_id(), key.as_slice())
    }

    pub fn deserialize(&mut self, input: &[u8]) -> Result<()> {
        if self.private_key.is_some() {
            return Err(Error::InvalidState { context: "deserialize on a share that already holds a key" });
        }
        let key = serialize::decode_private_key(input)?;
        let key: [u8; KEY_BYTES] = key
            .as_slice()
            .try_into()
            .map_err(|_| Error::Serialization { context: "X25519 private key width" })?;
        self.private_key = Some(StaticSecret::from(key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use tlskex_api::Alert;

    // RFC 7748 section 6.1 Diffie-Hellman test vectors.
    const ALICE_PRIVATE: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
    const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
    const SHARED: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

    #[test]
    fn finish_matches_the_rfc_7748_vector() {
        let envelope =
            serialize::encode_envelope(group::X25519, &hex::decode(ALICE_PRIVATE).unwrap()).unwrap();
        let (_, rest) = serialize::split_envelope(&envelope).unwrap();
        let mut ks = X25519KeyShare::new();
        ks.deserialize(rest).unwrap();

        let secret = ks.finish(&hex::decode(BOB_PUBLIC).unwrap()).unwrap();
        assert_eq!(hex::encode(secret.as_bytes()), SHARED);
    }

    #[test]
    fn offer_and_secret_are_32_bytes_and_both_sides_agree() {
        let mut client = X25519KeyShare::new();
        let mut server = X25519KeyShare::new();
        let client_offer = client.offer(&mut OsRng).unwrap();
        let server_offer = server.offer(&mut OsRng).unwrap();
        assert_eq!(client_offer.len(), KEY_BYTES);

        let client_secret = client.finish(&server_offer).unwrap();
        let server_secret = server.finish(&client_offer).unwrap();
        assert_eq!(client_secret.len(), KEY_BYTES);
        assert_eq!(client_secret.as_bytes(), server_secret.as_bytes());
    }

    #[test]
    fn wrong_length_peer_keys_are_decode_errors() {
        for len in [0, 31, 33] {
            let mut ks = X25519KeyShare::new();
            ks.offer(&mut OsRng).unwrap();
            let err = ks.finish(&vec![0x42; len]).unwrap_err();
            assert_eq!(err.alert(), Alert::DecodeError);
        }
    }

    #[test]
    fn rng_failure_is_an_internal_error() {
        let mut ks = X25519KeyShare::new();
        let err = ks.offer(&mut crate::test_rng::FailingRng).unwrap_err();
        assert_eq!(err.alert(), Alert::InternalError);
    }

    #[test]
    fn low_order_peer_key_is_a_decode_error() {
        let mut ks = X25519KeyShare::new();
        ks.offer(&mut OsRng).unwrap();
        let err = ks.finish(&[0u8; 32]).unwrap_err();
        assert_eq!(err.alert(), Alert::DecodeError);
    }

    #[test]
    fn serialize_stores_exactly_32_key_bytes() {
        let mut ks = X25519KeyShare::new();
        ks.offer(&mut OsRng).unwrap();
        let envelope = ks.serialize().unwrap();
        let (group_id, rest) = serialize::split_envelope(&envelope).unwrap();
        assert_eq!(group_id, group::X25519);
        assert_eq!(serialize::decode_private_key(rest).unwrap().len(), KEY_BYTES);
    }

    #[test]
    fn deserialized_share_finishes_like_the_original() {
        let mut original = X25519KeyShare::new();
        original.offer(&mut OsRng).unwrap();
        let envelope = original.serialize().unwrap();
        let (_, rest) = serialize::split_envelope(&envelope).unwrap();

        let mut restored = X25519KeyShare::new();
        restored.deserialize(rest).unwrap();

        let mut peer = X25519KeyShare::new();
        let peer_offer = peer.offer(&mut OsRng).unwrap();
        assert_eq!(
            original.finish(&peer_offer).unwrap().as_bytes(),
            restored.finish(&peer_offer).unwrap().as_bytes()
        );
    }
}
