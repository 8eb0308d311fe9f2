/// Word generation — multi-order fused random walks with rejection
/// sampling.
///
/// Each candidate word is a random walk over the alphabet: at every step
/// the rows of all available orders are multiplied element-wise and the
/// next symbol is drawn from the fused distribution. Candidates that
/// reproduce a dictionary word are rejected and rebuilt, up to a bounded
/// number of attempts.

use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::core::alphabet::{self, Symbol};
use crate::core::profile::LanguageProfile;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no novel word produced after {0} attempts")]
    Exhausted(u32),
}

/// Default cap on rejection-sampling attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 10_000;

/// Safety cap on candidate length, in symbols. A walk that runs this long
/// without sampling `End` is abandoned rather than allowed to grow
/// without bound.
const MAX_WORD_SYMBOLS: usize = 64;

impl LanguageProfile {
    /// Generate one novel word: a sequence of alphabet symbols that is
    /// not present in the training corpus.
    ///
    /// # Errors
    /// Returns [`GenerateError::Exhausted`] if [`MAX_ATTEMPTS`] candidate
    /// walks all failed — dead-ended, overran the length cap, or landed
    /// on real dictionary words.
    pub fn random_word(&self, rng: &mut StdRng) -> Result<String, GenerateError> {
        self.random_word_bounded(rng, MAX_ATTEMPTS)
    }

    /// [`random_word`](Self::random_word) with an explicit attempt cap.
    pub fn random_word_bounded(
        &self,
        rng: &mut StdRng,
        max_attempts: u32,
    ) -> Result<String, GenerateError> {
        for _ in 0..max_attempts {
            let Some(symbols) = self.walk(rng) else {
                continue;
            };
            let word = alphabet::render(&symbols);
            if word.is_empty() || self.corpus().contains(&word) {
                continue;
            }
            return Ok(word);
        }
        Err(GenerateError::Exhausted(max_attempts))
    }

    /// Generate `word_count` independent words joined by single spaces.
    /// A count of zero yields an empty string.
    pub fn random_sentence(
        &self,
        rng: &mut StdRng,
        word_count: usize,
    ) -> Result<String, GenerateError> {
        let mut words = Vec::with_capacity(word_count);
        for _ in 0..word_count {
            words.push(self.random_word(rng)?);
        }
        Ok(words.join(" "))
    }

    /// One candidate walk. Returns `None` if the walk dies (no order has
    /// information for the current context) or overruns the length cap.
    fn walk(&self, rng: &mut StdRng) -> Option<Vec<Symbol>> {
        let mut produced: Vec<Symbol> = Vec::new();
        loop {
            if produced.len() >= MAX_WORD_SYMBOLS {
                return None;
            }
            let fused = self.fused_row(&produced)?;
            let column = pick_symbol(&fused, rng)?;
            if column == alphabet::end_column() {
                return Some(produced);
            }
            produced.push(Symbol::Phone(column as u16));
        }
    }

    /// Element-wise product of every order's row for the current state.
    ///
    /// For each level k, the context is the trailing k produced symbols,
    /// `Start`-padded while the prefix is shorter than k. Orders with no
    /// row for their context contribute nothing. Returns `None` when no
    /// order has information or the product carries no probability mass.
    fn fused_row(&self, produced: &[Symbol]) -> Option<Vec<f64>> {
        let mut fused: Option<Vec<f64>> = None;

        for table in self.tables() {
            let context = trailing_context(produced, table.level());
            let Some(row) = table.row(&context) else {
                continue;
            };
            match fused.as_mut() {
                None => fused = Some(row.to_vec()),
                Some(acc) => {
                    for (a, p) in acc.iter_mut().zip(row) {
                        *a *= p;
                    }
                }
            }
        }

        let fused = fused?;
        if fused.iter().sum::<f64>() > 0.0 {
            Some(fused)
        } else {
            None
        }
    }
}

/// The last `level` symbols of `produced`, left-padded with `Start`.
fn trailing_context(produced: &[Symbol], level: usize) -> Vec<Symbol> {
    let mut context = Vec::with_capacity(level);
    if produced.len() < level {
        context.extend(std::iter::repeat(Symbol::Start).take(level - produced.len()));
        context.extend_from_slice(produced);
    } else {
        context.extend_from_slice(&produced[produced.len() - level..]);
    }
    context
}

/// Weighted random choice over a probability row.
///
/// Returns the sampled column index, or `None` if no weight is positive.
pub fn pick_symbol(weights: &[f64], rng: &mut StdRng) -> Option<usize> {
    let dist = WeightedIndex::new(weights).ok()?;
    Some(dist.sample(rng))
}
