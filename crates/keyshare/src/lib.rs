//! TLS key-share negotiation backends.
//!
//! A [`KeyShare`] is created from a wire group id and then driven through the
//! TLS lifecycle: the client calls `offer` and later `finish` on the server's
//! reply; the server calls `accept` once on the client's offer, which yields
//! both the reply and the shared secret. `serialize`/`deserialize` flatten an
//! offered share for session caching.
//!
//! Each variant owns its private key material exclusively and wipes it when
//! the exchange completes or the share is dropped.

pub mod cecpq2;
pub mod ec;
pub mod hybrid;
pub mod pq;
mod serialize;
#[cfg(test)]
mod test_rng;
pub mod x25519;

use rand::{CryptoRng, RngCore};

use tlskex_api::{Result, SharedSecret};
use tlskex_params::{find_group, GroupKind};

pub use cecpq2::Cecpq2KeyShare;
pub use ec::EcKeyShare;
pub use hybrid::HybridKeyShare;
pub use pq::PqKeyShare;
pub use x25519::X25519KeyShare;

/// A key-share backend, dispatched by group id.
pub enum KeyShare {
    Ec(EcKeyShare),
    X25519(X25519KeyShare),
    Cecpq2(Cecpq2KeyShare),
    PostQuantum(PqKeyShare),
    Hybrid(HybridKeyShare),
}

impl KeyShare {
    /// Instantiates the backend for a wire group id.
    ///
    /// Returns `None` for unknown ids and for post-quantum groups whose
    /// algorithm the backing library has disabled.
    pub fn create(group_id: u16) -> Option<KeyShare> {
        let group = find_group(group_id)?;
        match group.kind {
            GroupKind::Curve(curve) => Some(KeyShare::Ec(EcKeyShare::new(curve, group_id))),
            GroupKind::X25519 => Some(KeyShare::X25519(X25519KeyShare::new())),
            GroupKind::Cecpq2 => Cecpq2KeyShare::new().ok().map(KeyShare::Cecpq2),
            GroupKind::PostQuantum(algorithm) => {
                PqKeyShare::new(group_id, algorithm).ok().map(KeyShare::PostQuantum)
            }
            GroupKind::Hybrid(curve, algorithm) => {
                HybridKeyShare::new(group_id, curve, algorithm).ok().map(KeyShare::Hybrid)
            }
        }
    }

    /// Reloads a share that was flattened with [`KeyShare::serialize`]: a
    /// leading ASN.1 INTEGER group id, then the backend's private state.
    pub fn create_from_serialized(input: &[u8]) -> Option<KeyShare> {
        let (group_id, rest) = serialize::split_envelope(input).ok()?;
        let mut share = KeyShare::create(group_id)?;
        share.deserialize(rest).ok()?;
        Some(share)
    }

    pub fn group_id(&self) -> u16 {
        match self {
            KeyShare::Ec(share) => share.group_id(),
            KeyShare::X25519(share) => share.group_id(),
            KeyShare::Cecpq2(share) => share.group_id(),
            KeyShare::PostQuantum(share) => share.group_id(),
            KeyShare::Hybrid(share) => share.group_id(),
        }
    }

    /// Client side: generate a keypair, keep the private half, return the
    /// public share for the wire. Callable exactly once.
    pub fn offer<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        match self {
            KeyShare::Ec(share) => share.offer(rng),
            KeyShare::X25519(share) => share.offer(rng),
            KeyShare::Cecpq2(share) => share.offer(rng),
            KeyShare::PostQuantum(share) => share.offer(),
            KeyShare::Hybrid(share) => share.offer(rng),
        }
    }

    /// Server side, one-shot: consume the client's offer, produce the reply
    /// and the shared secret.
    pub fn accept<R: CryptoRng + RngCore>(
        &mut self,
        rng: &mut R,
        peer_key: &[u8],
    ) -> Result<(Vec<u8>, SharedSecret)> {
        match self {
            KeyShare::Cecpq2(share) => return share.accept(rng, peer_key),
            KeyShare::PostQuantum(share) => return share.accept(peer_key),
            KeyShare::Hybrid(share) => return share.accept(rng, peer_key),
            KeyShare::Ec(_) | KeyShare::X25519(_) => {}
        }
        // Interactive DH: the reply is an ordinary fresh offer and the secret
        // falls out of finish.
        let reply = self.offer(rng)?;
        let secret = self.finish(peer_key)?;
        Ok((reply, secret))
    }

    /// Client side: complete the exchange against the server's reply.
    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        match self {
            KeyShare::Ec(share) => share.finish(peer_key),
            KeyShare::X25519(share) => share.finish(peer_key),
            KeyShare::Cecpq2(share) => share.finish(peer_key),
            KeyShare::PostQuantum(share) => share.finish(peer_key),
            KeyShare::Hybrid(share) => share.finish(peer_key),
        }
    }

    /// Flattens an offered share for session caching. Supported for the
    /// classical curve and X25519 groups; the TLS stack never resumes the
    /// other groups from serialized state.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        match self {
            KeyShare::Ec(share) => share.serialize(),
            KeyShare::X25519(share) => share.serialize(),
            _ => Err(tlskex_api::Error::Serialization {
                context: "session caching is not supported for this group",
            }),
        }
    }

    /// Loads private state into a freshly created share.
    pub fn deserialize(&mut self, input: &[u8]) -> Result<()> {
        match self {
            KeyShare::Ec(share) => share.deserialize(input),
            KeyShare::X25519(share) => share.deserialize(input),
            _ => Err(tlskex_api::Error::Serialization {
                context: "session caching is not supported for this group",
            }),
        }
    }
}
