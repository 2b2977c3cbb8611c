//! core::sampling
//!
//! Random sampling discipline shared by all descriptors.
//!
//! # Design
//!
//! Each thread owns one `StdRng`, seeded from [`Settings::seed`] when set and
//! from OS entropy otherwise. [`rng`] hands out a cheap handle to it. Every
//! draw borrows the generator only for the duration of that draw, so sampling
//! may nest freely (a verified function may itself sample while being
//! verified).
//!
//! [`Settings::seed`]: crate::core::config::Settings::seed

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::config;

const CONSONANTS: &[u8] = b"cdfghjklmnpqrstvwxyz";
const VOWELS: &[u8] = b"aeiou";

thread_local! {
    static SHARED: Rc<RefCell<StdRng>> = Rc::new(RefCell::new(initial_rng()));
}

fn initial_rng() -> StdRng {
    match config::current().seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Handle to the calling thread's sampling generator.
#[derive(Clone)]
pub struct SampleRng(Rc<RefCell<StdRng>>);

impl RngCore for SampleRng {
    fn next_u32(&mut self) -> u32 {
        self.0.borrow_mut().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.borrow_mut().next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.0.borrow_mut().fill_bytes(dst);
    }
}

/// The calling thread's sampling generator.
pub fn rng() -> SampleRng {
    SHARED.with(|shared| SampleRng(Rc::clone(shared)))
}

/// Reset the calling thread's generator to a fixed seed.
pub fn reseed(seed: u64) {
    SHARED.with(|shared| *shared.borrow_mut() = StdRng::seed_from_u64(seed));
}

/// Uniform draw from `[0, 1)`.
pub fn unit(rng: &mut dyn RngCore) -> f64 {
    rng.random::<f64>()
}

/// True with probability `p`.
pub fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
    unit(rng) < p
}

/// Uniform index in `0..n`; `0` when `n == 0`.
pub fn below(rng: &mut dyn RngCore, n: usize) -> usize {
    if n == 0 {
        0
    } else {
        rng.random_range(0..n)
    }
}

/// Uniform element of `items`.
pub fn pick<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(below(rng, items.len()))
    }
}

/// A consonant followed by a vowel.
pub fn syllable(rng: &mut dyn RngCore) -> String {
    let c = CONSONANTS[below(rng, CONSONANTS.len())];
    let v = VOWELS[below(rng, VOWELS.len())];
    format!("{}{}", c as char, v as char)
}

/// A printable ASCII character in `' '..='}'`.
pub fn printable(rng: &mut dyn RngCore) -> char {
    char::from(32 + below(rng, 94) as u8)
}
