//! Key shares backed by a post-quantum KEM from liboqs.
//!
//! One wrapper covers every KEM the registry names: the algorithm handle is
//! resolved at construction and all lengths come from it. The client side is
//! the decapsulator (`offer` + `finish`); the server side encapsulates in a
//! single `accept`.

use tlskex_api::{Error, Result, SharedSecret};
use tlskex_params::PqAlgorithmId;

pub struct PqKeyShare {
    group_id: u16,
    algorithm: PqAlgorithmId,
    kem: oqs::kem::Kem,
    private_key: Option<oqs::kem::SecretKey>,
}

/// The library handle for a registry algorithm id.
pub(crate) fn oqs_algorithm(id: PqAlgorithmId) -> oqs::kem::Algorithm {
    use oqs::kem::Algorithm;
    match id {
        PqAlgorithmId::Frodo640Aes => Algorithm::FrodoKem640Aes,
        PqAlgorithmId::Frodo640Shake => Algorithm::FrodoKem640Shake,
        PqAlgorithmId::Frodo976Aes => Algorithm::FrodoKem976Aes,
        PqAlgorithmId::Frodo976Shake => Algorithm::FrodoKem976Shake,
        PqAlgorithmId::Frodo1344Aes => Algorithm::FrodoKem1344Aes,
        PqAlgorithmId::Frodo1344Shake => Algorithm::FrodoKem1344Shake,
        PqAlgorithmId::NtruHps2048509 => Algorithm::NtruHps2048509,
        PqAlgorithmId::NtruHps2048677 => Algorithm::NtruHps2048677,
        PqAlgorithmId::NtruHps4096821 => Algorithm::NtruHps4096821,
        PqAlgorithmId::NtruHrss701 => Algorithm::NtruHrss701,
        PqAlgorithmId::Lightsaber => Algorithm::Lightsaber,
        PqAlgorithmId::Saber => Algorithm::Saber,
        PqAlgorithmId::FireSaber => Algorithm::Firesaber,
        PqAlgorithmId::Kyber512 => Algorithm::Kyber512,
        PqAlgorithmId::Kyber768 => Algorithm::Kyber768,
        PqAlgorithmId::Kyber1024 => Algorithm::Kyber1024,
        PqAlgorithmId::Kyber90s512 => Algorithm::Kyber512_90s,
        PqAlgorithmId::Kyber90s768 => Algorithm::Kyber768_90s,
        PqAlgorithmId::Kyber90s1024 => Algorithm::Kyber1024_90s,
    }
}

/// Whether the backing library was built with this algorithm.
pub(crate) fn algorithm_available(id: PqAlgorithmId) -> bool {
    oqs::init();
    oqs_algorithm(id).is_enabled()
}

impl PqKeyShare {
    /// Fails with `UnsupportedGroup` when the library has the algorithm
    /// disabled.
    pub(crate) fn new(group_id: u16, algorithm: PqAlgorithmId) -> Result<Self> {
        oqs::init();
        let alg = oqs_algorithm(algorithm);
        if !alg.is_enabled() {
            return Err(Error::UnsupportedGroup { group_id });
        }
        let kem = oqs::kem::Kem::new(alg).map_err(|_| Error::UnsupportedGroup { group_id })?;
        Ok(PqKeyShare { group_id, algorithm, kem, private_key: None })
    }

    pub fn group_id(&self) -> u16 {
        self.group_id
    }

    pub fn algorithm_name(&self) -> &'static str {
        self.algorithm.name()
    }

    pub fn public_key_bytes(&self) -> usize {
        self.kem.length_public_key()
    }

    pub fn ciphertext_bytes(&self) -> usize {
        self.kem.length_ciphertext()
    }

    pub fn shared_secret_bytes(&self) -> usize {
        self.kem.length_shared_secret()
    }

    pub fn offer(&mut self) -> Result<Vec<u8>> {
        if self.private_key.is_some() {
            return Err(Error::InvalidState { context: "offer on a share that already holds a key" });
        }
        let (public_key, private_key) = self
            .kem
            .keypair()
            .map_err(|_| Error::PrivateKeyOperation { context: "KEM keypair" })?;
        self.private_key = Some(private_key);
        Ok(public_key.into_vec())
    }

    /// Server side: encapsulate against the client's public key.
    pub fn accept(&mut self, peer_key: &[u8]) -> Result<(Vec<u8>, SharedSecret)> {
        if peer_key.len() != self.kem.length_public_key() {
            return Err(Error::InvalidLength {
                context: "KEM peer public key",
                expected: self.kem.length_public_key(),
                actual: peer_key.len(),
            });
        }
        let peer_public = self
            .kem
            .public_key_from_bytes(peer_key)
            .ok_or(Error::BadPeerKey { context: "KEM peer public key" })?;
        let (ciphertext, shared) = self
            .kem
            .encapsulate(peer_public)
            .map_err(|_| Error::BadPeerKey { context: "KEM peer public key" })?;
        Ok((ciphertext.into_vec(), SharedSecret::new(shared.into_vec())))
    }

    /// Client side: decapsulate the server's ciphertext.
    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidState { context: "finish before offer" })?;
        if peer_key.len() != self.kem.length_ciphertext() {
            return Err(Error::InvalidLength {
                context: "KEM ciphertext",
                expected: self.kem.length_ciphertext(),
                actual: peer_key.len(),
            });
        }
        let ciphertext = self
            .kem
            .ciphertext_from_bytes(peer_key)
            .ok_or(Error::BadPeerKey { context: "KEM ciphertext" })?;
        let shared = self
            .kem
            .decapsulate(private_key, ciphertext)
            .map_err(|_| Error::BadPeerKey { context: "KEM ciphertext" })?;
        self.private_key = None;
        Ok(SharedSecret::new(shared.into_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlskex_api::Alert;
    use tlskex_params::groups::group;

    fn kyber512() -> Option<PqKeyShare> {
        PqKeyShare::new(group::KYBER512, PqAlgorithmId::Kyber512).ok()
    }

    #[test]
    fn offer_accept_finish_agree() {
        let (Some(mut client), Some(mut server)) = (kyber512(), kyber512()) else {
            return; // library built without Kyber
        };
        let offer = client.offer().unwrap();
        assert_eq!(offer.len(), client.public_key_bytes());

        let (reply, server_secret) = server.accept(&offer).unwrap();
        assert_eq!(reply.len(), server.ciphertext_bytes());

        let client_secret = client.finish(&reply).unwrap();
        assert_eq!(client_secret.as_bytes(), server_secret.as_bytes());
        assert_eq!(client_secret.len(), client.shared_secret_bytes());
    }

    #[test]
    fn wrong_length_inputs_are_decode_errors() {
        let Some(mut share) = kyber512() else { return };
        let err = share.accept(&[0u8; 17]).unwrap_err();
        assert_eq!(err.alert(), Alert::DecodeError);

        let Some(mut share) = kyber512() else { return };
        share.offer().unwrap();
        let err = share.finish(&[0u8; 17]).unwrap_err();
        assert_eq!(err.alert(), Alert::DecodeError);
    }

    #[test]
    fn finish_before_offer_is_a_state_error() {
        let Some(mut share) = kyber512() else { return };
        let ct = vec![0u8; share.ciphertext_bytes()];
        assert!(matches!(share.finish(&ct), Err(Error::InvalidState { .. })));
    }
}
