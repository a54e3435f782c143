//! Expansion policy: which untried action becomes the next child

use rand::Rng;
use rand::RngCore;

/// Random expansion policy
///
/// Selects an untried action uniformly at random.
#[derive(Debug, Clone, Default)]
pub struct RandomExpansionPolicy;

impl RandomExpansionPolicy {
    /// Creates a new random expansion policy
    pub fn new() -> Self {
        RandomExpansionPolicy
    }

    /// Picks one position among `untried`, or `None` if nothing is left
    pub fn select_untried<'a, T>(&self, untried: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
        if untried.is_empty() {
            return None;
        }
        untried.get(rng.gen_range(0..untried.len()))
    }
}
