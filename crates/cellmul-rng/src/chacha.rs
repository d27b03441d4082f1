use foundation::Element;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ValueSource;

pub struct ChaCha {
    rng: ChaCha8Rng,
}

impl ChaCha {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ValueSource for ChaCha {
    fn next_value(&mut self) -> Element {
        crate::bounded(self.rng.next_u32())
    }
}
