use core::fmt;
use core::str::FromStr;

use foundation::{Element, Matrix, VALUE_UPPER_BOUND};

pub mod chacha;
pub mod lcg;

pub use chacha::ChaCha;
pub use lcg::Lcg;

/// Endless stream of input values in `[0, VALUE_UPPER_BOUND)`.
pub trait ValueSource {
    fn next_value(&mut self) -> Element;
}

impl<S: ValueSource + ?Sized> ValueSource for &mut S {
    fn next_value(&mut self) -> Element {
        (**self).next_value()
    }
}

impl<S: ValueSource + ?Sized> ValueSource for Box<S> {
    fn next_value(&mut self) -> Element {
        (**self).next_value()
    }
}

#[inline]
pub(crate) fn bounded(raw: u32) -> Element {
    Element::from(raw) % VALUE_UPPER_BOUND
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RngKind {
    /// Linear congruential generator.
    #[default]
    Lcg,
    /// ChaCha8 stream cipher generator.
    Chacha,
}

impl RngKind {
    pub fn source(self, seed: u64) -> Box<dyn ValueSource + Send> {
        match self {
            RngKind::Lcg => Box::new(Lcg::new(seed)),
            RngKind::Chacha => Box::new(ChaCha::new(seed)),
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RngKind::Lcg => "lcg",
            RngKind::Chacha => "chacha",
        })
    }
}

impl FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lcg" => Ok(RngKind::Lcg),
            "chacha" => Ok(RngKind::Chacha),
            other => Err(format!("unknown rng `{other}` (expected lcg or chacha)")),
        }
    }
}

/// Overwrites every cell of `matrix`, row-major.
pub fn populate<S: ValueSource + ?Sized>(matrix: &mut Matrix, source: &mut S) {
    for cell in matrix.as_mut_slice() {
        *cell = source.next_value();
    }
}
