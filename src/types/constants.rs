/// Position reported by the sentinel site of an empty chooser
pub const SENTINEL_POSITION: i64 = -1;

/// Placeholder allele of the sentinel site
pub const SENTINEL_ALLELE: char = 'N';

/// Number of simulated scores drawn before the first p-value estimate
pub const DEFAULT_ITERATIONS: usize = 1_000_000;

/// Extra simulations added each time the p-value sits at its lower bound
pub const DEFAULT_ITERATION_STEP: usize = 1_000_000;

/// Simulation stops extending the null distribution beyond this size
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000_000;
