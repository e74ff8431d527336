use std::collections::HashMap;
use crate::weighted_choice::{SiteChooser, WeightedChoice};

/// Chi-squared critical value at 95% confidence with 4 degrees of freedom
const CHI_SQUARED_95_DF4: f64 = 9.488;

fn chi_squared(observed: &[usize], weights: &[f64], draws: usize) -> f64 {
    let total: f64 = weights.iter().sum();
    observed
        .iter()
        .zip(weights.iter())
        .map(|(&count, &weight)| {
            let expected = draws as f64 * weight / total;
            (count as f64 - expected).powi(2) / expected
        })
        .sum()
}

fn sample_counts(seed: u64, weights: &[f64], draws: usize) -> Vec<usize> {
    let mut chooser = WeightedChoice::with_seed(seed);
    for (i, weight) in weights.iter().enumerate() {
        chooser.add_choice(i, *weight).expect("Failed to add choice");
    }

    let mut counts = vec![0; weights.len()];
    for _ in 0..draws {
        counts[chooser.choice_index().expect("Failed to choose")] += 1;
    }
    counts
}

/// Tests that empirical frequencies match the weights with a chi-squared
/// goodness-of-fit test at 95% confidence.
///
/// Each seed fails the test with probability 0.05, so we require at least 15
/// of 20 seeds to pass.
#[test]
fn test_frequencies_fit_weights() {
    let weights = [1.0, 2.0, 3.0, 4.0, 10.0];
    let draws = 100_000;

    let passed = (0..20)
        .filter(|&seed| {
            let counts = sample_counts(seed, &weights, draws);
            chi_squared(&counts, &weights, draws) < CHI_SQUARED_95_DF4
        })
        .count();

    assert!(passed >= 15, "only {} of 20 seeds passed the goodness-of-fit test", passed);
}

/// Tests that tiny per-site mutation rates sample the same way as unit weights.
#[test]
fn test_mutation_rate_scale_weights() {
    let weights = [1e-9, 2e-9, 3e-9, 4e-9, 10e-9];
    let draws = 100_000;

    let counts = sample_counts(99, &weights, draws);
    let total: f64 = weights.iter().sum();
    for (count, weight) in counts.iter().zip(weights.iter()) {
        let expected = draws as f64 * weight / total;
        assert!((*count as f64 - expected).abs() < 0.05 * expected + 200.0,
            "count {} too far from expected {}", count, expected);
    }
}

/// Seed 42 with three sites weighted 0.5, 0.3 and 0.2 sampled 10,000 times.
#[test]
fn test_three_site_scenario() {
    let mut sites = SiteChooser::with_seed(42);
    sites.add_site(100, 0.5, 'A', 'T').expect("Failed to add site");
    sites.add_site(200, 0.3, 'G', 'C').expect("Failed to add site");
    sites.add_site(300, 0.2, 'A', 'G').expect("Failed to add site");

    assert!((sites.get_summed_rate() - 1.0).abs() < 1e-12);

    let mut counts: HashMap<i64, usize> = HashMap::new();
    for _ in 0..10_000 {
        let site = sites.choice_or_sentinel();
        *counts.entry(site.position).or_insert(0) += 1;
    }

    assert_eq!(counts.len(), 3);
    for (position, expected) in [(100, 5_000), (200, 3_000), (300, 2_000)] {
        let count = counts[&position] as i64;
        assert!((count - expected).abs() <= 200, "position {} drawn {} times", position, count);
    }
}
