//! The generic hybrid composer: a classical share and a PQ share behind one
//! group id.
//!
//! Wire framing, identical for the client offer and the server reply:
//!
//! ```text
//! u16 classical_len ‖ classical_bytes ‖ u16 pq_len ‖ pq_bytes
//! ```
//!
//! The shared secret is `classical ‖ pq`, in that order. Both length fields
//! are validated against the whole buffer before anything is sliced.

use rand::{CryptoRng, RngCore};

use tlskex_api::{Error, Result, SharedSecret};
use tlskex_params::{CurveId, PqAlgorithmId};

use crate::ec::EcKeyShare;
use crate::pq::PqKeyShare;
use crate::KeyShare;

pub struct HybridKeyShare {
    group_id: u16,
    classical: Box<KeyShare>,
    post_quantum: PqKeyShare,
}

fn frame(classical: &[u8], post_quantum: &[u8]) -> Result<Vec<u8>> {
    let too_large = Error::Serialization { context: "hybrid field exceeds u16" };
    let classical_len = u16::try_from(classical.len()).map_err(|_| too_large.clone())?;
    let post_quantum_len = u16::try_from(post_quantum.len()).map_err(|_| too_large)?;

    let mut out = Vec::with_capacity(4 + classical.len() + post_quantum.len());
    out.extend_from_slice(&classical_len.to_be_bytes());
    out.extend_from_slice(classical);
    out.extend_from_slice(&post_quantum_len.to_be_bytes());
    out.extend_from_slice(post_quantum);
    Ok(out)
}

/// Splits `u16 ‖ A ‖ u16 ‖ B`, rejecting anything that does not account for
/// every byte of the buffer.
fn split_frames(peer_key: &[u8]) -> Result<(&[u8], &[u8])> {
    let malformed = Error::BadPeerKey { context: "hybrid share framing" };

    let (classical_len, rest) = split_u16(peer_key).ok_or(malformed.clone())?;
    if rest.len() < classical_len {
        return Err(malformed);
    }
    let (classical, rest) = rest.split_at(classical_len);

    let (post_quantum_len, rest) = split_u16(rest).ok_or(malformed.clone())?;
    if rest.len() != post_quantum_len {
        return Err(malformed);
    }
    Ok((classical, rest))
}

fn split_u16(input: &[u8]) -> Option<(usize, &[u8])> {
    let (len, rest) = input.split_first_chunk::<2>()?;
    Some((usize::from(u16::from_be_bytes(*len)), rest))
}

impl HybridKeyShare {
    pub(crate) fn new(group_id: u16, curve: CurveId, algorithm: PqAlgorithmId) -> Result<Self> {
        let classical = Box::new(KeyShare::Ec(EcKeyShare::new(curve, curve.group_id())));
        let post_quantum = PqKeyShare::new(group_id, algorithm)?;
        Ok(HybridKeyShare { group_id, classical, post_quantum })
    }

    pub fn group_id(&self) -> u16 {
        self.group_id
    }

    pub fn post_quantum_algorithm(&self) -> &'static str {
        self.post_quantum.algorithm_name()
    }

    pub fn offer<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        let classical = self.classical.offer(rng)?;
        let post_quantum = self.post_quantum.offer()?;
        frame(&classical, &post_quantum)
    }

    pub fn accept<R: CryptoRng + RngCore>(
        &mut self,
        rng: &mut R,
        peer_key: &[u8],
    ) -> Result<(Vec<u8>, SharedSecret)> {
        let (peer_classical, peer_post_quantum) = split_frames(peer_key)?;
        let (classical_reply, classical_secret) = self.classical.accept(rng, peer_classical)?;
        let (post_quantum_reply, post_quantum_secret) =
            self.post_quantum.accept(peer_post_quantum)?;
        let reply = frame(&classical_reply, &post_quantum_reply)?;
        Ok((reply, SharedSecret::concat(classical_secret, post_quantum_secret)))
    }

    pub fn finish(&mut self, peer_key: &[u8]) -> Result<SharedSecret> {
        let (peer_classical, peer_post_quantum) = split_frames(peer_key)?;
        let classical_secret = self.classical.finish(peer_classical)?;
        let post_quantum_secret = self.post_quantum.finish(peer_post_quantum)?;
        Ok(SharedSecret::concat(classical_secret, post_quantum_secret))
    }
}
