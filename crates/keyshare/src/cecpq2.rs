//! CECPQ2: X25519 combined with NTRU-HRSS-701.
//!
//! Unlike the generic hybrid composer, the two fields are concatenated with
//! no length prefixes; both component sizes are fixed by the algorithms.
//!
//! Wire layout:
//!   client offer  = X25519 public (32) ‖ HRSS public key
//!   server reply  = X25519 public (32) ‖ HRSS ciphertext
//!   shared secret = X25519 secret (32) ‖ HRSS secret

use rand::{CryptoRng, RngCore};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroize;

use tlskex_api::{Error, Result, SharedSecret};
use tlskex_params::groups::{group, hrss};
use tlskex_params::PqAlgorithmId;

use crate::pq::oqs_algorithm;
use crate::x25519::KEY_BYTES as X25519_BYTES;

pub struct Cecpq2KeyShare {
    x25519_private_key: Option<StaticSecret>,
    hrss: oqs::kem::Kem,
    hrss_private_key: Option<oqs::kem::SecretKey>,
}

fn x25519_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<StaticSecret> {
    let mut bytes = [0u8; X25519_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|_| Error::RandomGeneration { context: "CECPQ2 X25519 private key" })?;
    let private_key = StaticSecret::from(bytes);
    bytes.zeroize();
    Ok(private_key)
}

impl Cecpq2KeyShare {
    pub(crate) fn new() -> Result<Self> {
        oqs::init();
        let alg = oqs_algorithm(PqAlgorithmId::NtruHrss701);
        if !alg.is_enabled() {
            return Err(Error::UnsupportedGroup { group_id: group::CECPQ2 });
        }
        let hrss = oqs::kem::Kem::new(alg)
            .map_err(|_| Error::UnsupportedGroup { group_id: group::CECPQ2 })?;
        Ok(Cecpq2KeyShare { x25519_private_key: None, hrss, hrss_private_key: None })
    }

    pub fn group_id(&self) -> u16 {
        group::CECPQ2
    }

    pub fn offer<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        if self.x25519_private_key.is_some() || self.hrss_private_key.is_some() {
            return Err(Error::InvalidState { context: "offer on a share that already holds a key" });
        }
        let x25519_private_key = x25519_keypair(rng)?;
        let x25519_public_key = PublicKey::from(&x25519_private_key);

        let (hrss_public_key, hrss_private_key) = self
            .hrss
            .keypair()
            .map_err(|_| Error::PrivateKeyOperation { context: "HRSS keypair" })?;

        let mut out = Vec::with_capacity(X25519_BYTES + hrss::PUBLIC_KEY_BYTES);
        out.extend_from_slice(x25519_public_key.as_bytes());
        out.extend_from_slice(hrss_public_key.as_ref());

        self.x25519_private_key = Some(x25519_private_key);
        self.hrss_private_key = Some(hrss_private_key);
        Ok(out)
    }

    /// Server side only. Generates a fresh X25519 keypair each call,
    /// overwriting anything a prior `offer` stored; do not call `offer` and
    /// then `accept` on the same share.
    pub fn accept<R: CryptoRng + RngCore>(
        &mut self,
        rng: &mut R,
        peer_key: &[u8],
    ) -> Result<(Vec<u8>, SharedSecret)> {
        if peer_key.len() != X25519_BYTES + hrss::PUBLIC_KEY_BYTES {
            return Err(Error::InvalidLength {
                context: "CECPQ2 client share",
                expected: X25519_BYTES + hrss::PUBLIC_KEY_BYTES,
                actual: peer_key.len(),
            });
        }
        let (peer_x25519, peer_hrss) = peer_key.split_at(X25519_BYTES);

        let x25519_private_key = x25519_keypair(rng)?;
        let x25519_public_key = PublicKey::from(&x25519_private_key);

        let peer_x25519: [u8; X25519_BYTES] = peer_x25519.try_into()
            .map_err(|_| Error::BadPeerKey { context: "CECPQ2 X25519 share" })?;
        let x25519_secret = x25519_private_key.diffie_hellman(&PublicKey::from(peer_x25519));
        if !x25519_secret.was_contributory() {
            return Err(Error::BadPeerKey { context: "CECPQ2 X25519 share" });
        }

        let peer_hrss_public = self
            .hrss
            .public_key_from_bytes(peer_hrss)
            .ok_or(Error::BadPeerKey { context: "CECPQ2 HRSS public key" })?;
        let (hrss_ciphertext, hrss_secret) = self
            .hrss
            .encapsulate(peer_hrss_public)
            .map_err(|_| Error::BadPeerKey { context: "CECPQ2 HRSS public key" })?;

        let mut reply = Vec::with_capacity(X25519_BYTES + hrss::CIPHERTEXT_BYTES);
        reply.extend_from_slice(x25519_public_key.as_bytes());
        reply.extend_from_slice(hrss_ciphertext.as_ref());

        let secret = SharedSecret::concat(
            SharedSecret::new(x25519_secret.as_bytes().to_vec()),
            SharedSecret::new(hrss_secret.into_vec()),
        );

        self.x25519_private_key = None;
        self.hrss_private_key = None;
        Ok((reply, secret))
    }

    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        let x25519_private_key = self
            .x25519_private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "finish before offer" })?;
        let hrss_private_key = self
            .hrss_private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "finish before offer" })?;

        if peer_key.len() != X25519_BYTES + hrss::CIPHERTEXT_BYTES {
            return Err(Error::InvalidLength {
                context: "CECPQ2 server share",
                expected: X25519_BYTES + hrss::CIPHERTEXT_BYTES,
                actual: peer_key.len(),
            });
        }
        let (peer_x25519, peer_ciphertext) = peer_key.split_at(X25519_BYTES);

        let peer_x25519: [u8; X25519_BYTES] = peer_x25519.try_into()
            .map_err(|_| Error::BadPeerKey { context: "CECPQ2 X25519 share" })?;
        let x25519_secret = x25519_private_key.diffie_hellman(&PublicKey::from(peer_x25519));
        if !x25519_secret.was_contributory() {
            return Err(Error::BadPeerKey { context: "CECPQ2 X25519 share" });
        }

        let ciphertext = self
            .hrss
            .ciphertext_from_bytes(peer_ciphertext)
            .ok_or(Error::BadPeerKey { context: "CECPQ2 HRSS ciphertext" })?;
        let hrss_secret = self
            .hrss
            .decapsulate(hrss_private_key, ciphertext)
            .map_err(|_| Error::BadPeerKey { context: "CECPQ2 HRSS ciphertext" })?;

        let secret = SharedSecret::concat(
            SharedSecret::new(x25519_secret.as_bytes().to_vec()),
            SharedSecret::new(hrss_secret.into_vec()),
        );
        self.x25519_private_key = None;
        self.hrss_private_key = None;
        Ok(secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use tlskex_api::Alert;

    fn share() -> Option<Cecpq2KeyShare> {
        Cecpq2KeyShare::new().ok()
    }

    #[test]
    fn full_round_trip_agrees_and_has_the_advertised_secret_length() {
        let (Some(mut client), Some(mut server)) = (share(), share()) else {
            return; // library built without NTRU-HRSS
        };
        let offer = client.offer(&mut OsRng).unwrap();
        assert_eq!(offer.len(), X25519_BYTES + hrss::PUBLIC_KEY_BYTES);

        let (reply, server_secret) = server.accept(&mut OsRng, &offer).unwrap();
        assert_eq!(reply.len(), X25519_BYTES + hrss::CIPHERTEXT_BYTES);

        let client_secret = client.finish(&reply).unwrap();
        assert_eq!(client_secret.len(), X25519_BYTES + hrss::KEY_BYTES);
        assert_eq!(server_secret.len(), X25519_BYTES + hrss::KEY_BYTES);
        assert_eq!(client_secret.as_bytes(), server_secret.as_bytes());
    }

    #[test]
    fn wrong_length_shares_are_decode_errors() {
        let Some(mut server) = share() else { return };
        let err = server.accept(&mut OsRng, &[0u8; 100]).unwrap_err();
        assert_eq!(err.alert(), Alert::DecodeError);

        let (Some(mut client), Some(_)) = (share(), share()) else { return };
        client.offer(&mut OsRng).unwrap();
        // One byte short of a valid server reply.
        let err = client
            .finish(&vec![0u8; X25519_BYTES + hrss::CIPHERTEXT_BYTES - 1])
            .unwrap_err();
        assert_eq!(err.alert(), Alert::DecodeError);
    }
}
