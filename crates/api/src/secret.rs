//! Shared-secret container.

use core::fmt;

use zeroize::Zeroizing;

/// The negotiated shared secret.
///
/// An opaque byte string of backend-determined length. The buffer is wiped
/// on drop; `Debug` prints only the length so secrets never reach logs.
pub struct SharedSecret(Zeroizing<Vec<u8>>);

impl SharedSecret {
    pub fn new(bytes: Vec<u8>) -> Self {
        SharedSecret(Zeroizing::new(bytes))
    }

    /// Concatenation in hybrid order: classical first, post-quantum second.
    pub fn concat(classical: SharedSecret, post_quantum: SharedSecret) -> Self {
        let mut combined = Zeroizing::new(Vec::with_capacity(classical.len() + post_quantum.len()));
        combined.extend_from_slice(classical.as_bytes());
        combined.extend_from_slice(post_quantum.as_bytes());
        SharedSecret(combined)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_keeps_classical_first() {
        let a = SharedSecret::new(vec![1, 2, 3]);
        let b = SharedSecret::new(vec![4, 5]);
        let c = SharedSecret::concat(a, b);
        assert_eq!(c.as_bytes(), &[1, 2, 3, 4, 5]);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let s = SharedSecret::new(vec![0xAA; 32]);
        assert_eq!(format!("{:?}", s), "SharedSecret(32 bytes)");
    }
}
