use foundation::Element;

use crate::ValueSource;

/// `s = s * 1103515245 + 12345`, taking bits 16.. of each state.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed as u32) ^ ((seed >> 32) as u32),
        }
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        self.state >> 16
    }
}

impl ValueSource for Lcg {
    fn next_value(&mut self) -> Element {
        crate::bounded(self.step())
    }
}
