//! An RNG that always fails, for exercising the internal-error paths.

use rand::{CryptoRng, Error, RngCore};

pub(crate) struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).expect("FailingRng always fails")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Error> {
        Err(Error::new("no entropy available"))
    }
}

impl CryptoRng for FailingRng {}
