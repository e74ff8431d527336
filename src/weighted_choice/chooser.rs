use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::ChooserError;

/// Draws items with probability proportional to their weight.
///
/// Items are appended together with a running (inclusive) prefix sum of their
/// weights, so every insertion leaves the chooser ready to sample again. A draw
/// is a uniform value in `[0, total)` mapped back onto an item by a lower-bound
/// search over the prefix sums.
#[derive(Debug, Clone)]
pub struct WeightedChoice<T> {
    /// Items in insertion order
    items: Vec<T>,
    /// `cumulative[i]` is the summed weight of `items[0..=i]`
    cumulative: Vec<f64>,
    rng: ChaCha8Rng,
}

impl<T> WeightedChoice<T> {
    /// Creates an empty chooser seeded from the system clock.
    pub fn new() -> Self {
        Self::with_seed(clock_seed())
    }

    /// Creates an empty chooser with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            items: Vec::new(),
            cumulative: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Adds another choice with the given weight.
    ///
    /// Negative and non-finite weights are rejected before anything is stored.
    pub fn add_choice(&mut self, item: T, weight: f64) -> Result<(), ChooserError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ChooserError::InvalidWeight(weight));
        }

        let cumulative_sum = self.get_summed_rate() + weight;
        self.cumulative.push(cumulative_sum);
        self.items.push(item);
        Ok(())
    }

    /// Chooses a random item using the recorded weights.
    pub fn choice(&mut self) -> Result<&T, ChooserError> {
        let index = self.choice_index()?;
        Ok(&self.items[index])
    }

    /// Chooses a random item and returns its insertion index.
    pub fn choice_index(&mut self) -> Result<usize, ChooserError> {
        if self.cumulative.is_empty() {
            return Err(ChooserError::NoChoicesAvailable);
        }

        let total = self.get_summed_rate();
        let number = draw(&mut self.rng, total);

        // the draw never exceeds the last prefix sum, so the index is in range
        Ok(lower_bound(&self.cumulative, number))
    }

    /// Gets the summed weight of all current choices.
    pub fn get_summed_rate(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Inclusive prefix sums of the weights, parallel to `items()`
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }
}

impl<T> Default for WeightedChoice<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws a float uniformly from `[0, upper_bound)`; a zero bound always yields 0.
fn draw<R: Rng>(rng: &mut R, upper_bound: f64) -> f64 {
    rng.gen::<f64>() * upper_bound
}

/// Index of the first element `>= value` in a non-decreasing slice.
fn lower_bound(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&x| x < value)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
