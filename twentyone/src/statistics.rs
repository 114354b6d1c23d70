use std::collections::BTreeMap;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::SimulationError;

/// The distribution of observed outcomes: a map from net winnings to how
/// often that figure came up. Combining two results merges the counts per
/// key, which is associative and commutative, so partial results can be
/// folded in any order (or on any number of threads) and agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationResult {
    result_counter: BTreeMap<i64, u64>,
}

impl SimulationResult {
    pub fn new() -> SimulationResult {
        SimulationResult {
            result_counter: BTreeMap::new(),
        }
    }

    pub fn from_outcome(outcome: i64) -> SimulationResult {
        let mut result = SimulationResult::new();
        result.record(outcome);
        result
    }

    pub fn record(&mut self, outcome: i64) {
        *self.result_counter.entry(outcome).or_insert(0) += 1;
    }

    pub fn total_games(&self) -> u64 {
        self.result_counter.values().sum()
    }

    pub fn total_winnings(&self) -> i64 {
        self.result_counter
            .iter()
            .map(|(&outcome, &occurrences)| outcome * occurrences as i64)
            .sum()
    }

    pub fn expected_winnings(&self) -> Result<f64, SimulationError> {
        if self.total_games() == 0 {
            return Err(SimulationError::NoRecordedGames);
        }
        Ok(self.total_winnings() as f64 / self.total_games() as f64)
    }

    /// Population variance of the outcome distribution, E[X²] − E[X]²,
    /// with no Bessel correction.
    pub fn sample_variance(&self) -> Result<f64, SimulationError> {
        let expected = self.expected_winnings()?;
        let squared_sum: f64 = self
            .result_counter
            .iter()
            .map(|(&outcome, &occurrences)| (outcome as f64).powi(2) * occurrences as f64)
            .sum();
        Ok(squared_sum / self.total_games() as f64 - expected.powi(2))
    }

    pub fn sample_std_deviation(&self) -> Result<f64, SimulationError> {
        Ok(self.sample_variance()?.sqrt())
    }

    /// The 95% confidence interval around the expected winnings,
    /// mean ± 1.96·σ/√n.
    pub fn confidence_interval_95(&self) -> Result<(f64, f64), SimulationError> {
        let expected = self.expected_winnings()?;
        let std_deviation = self.sample_std_deviation()?;
        let margin = 1.96 * std_deviation / (self.total_games() as f64).sqrt();
        Ok((expected - margin, expected + margin))
    }

    /// The fraction of games that did not lose money (outcome ≥ 0).
    pub fn profitable_fraction(&self) -> Result<f64, SimulationError> {
        if self.total_games() == 0 {
            return Err(SimulationError::NoRecordedGames);
        }
        let profitable: u64 = self
            .result_counter
            .iter()
            .filter(|(&outcome, _)| outcome >= 0)
            .map(|(_, &occurrences)| occurrences)
            .sum();
        Ok(profitable as f64 / self.total_games() as f64)
    }

    /// The smallest and largest outcome present, or None when empty.
    pub fn range(&self) -> Option<(i64, i64)> {
        let (&low, _) = self.result_counter.first_key_value()?;
        let (&high, _) = self.result_counter.last_key_value()?;
        Some((low, high))
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.result_counter
            .iter()
            .map(|(&outcome, &occurrences)| (outcome, occurrences))
    }
}

impl AddAssign for SimulationResult {
    fn add_assign(&mut self, rhs: SimulationResult) {
        for (outcome, occurrences) in rhs.result_counter {
            *self.result_counter.entry(outcome).or_insert(0) += occurrences;
        }
    }
}

impl Add for SimulationResult {
    type Output = SimulationResult;

    fn add(mut self, rhs: SimulationResult) -> SimulationResult {
        self += rhs;
        self
    }
}

impl Sum for SimulationResult {
    fn sum<I: Iterator<Item = SimulationResult>>(iter: I) -> SimulationResult {
        iter.fold(SimulationResult::new(), |acc, next| acc + next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(outcomes: &[i64]) -> SimulationResult {
        let mut result = SimulationResult::new();
        for &outcome in outcomes {
            result.record(outcome);
        }
        result
    }

    #[test]
    fn totals_follow_the_recorded_outcomes() {
        let result = result_of(&[10, 10, -10, 0]);
        assert_eq!(result.total_games(), 4);
        assert_eq!(result.total_winnings(), 10);
        assert_eq!(result.expected_winnings().unwrap(), 2.5);
    }

    #[test]
    fn combination_is_commutative() {
        let a = result_of(&[10, -10]);
        let b = result_of(&[0, 10, 20]);
        assert_eq!(a.clone() + b.clone(), b + a);
    }

    #[test]
    fn combination_is_associative() {
        let a = result_of(&[10]);
        let b = result_of(&[-10, -10]);
        let c = result_of(&[0, 30]);
        assert_eq!(
            (a.clone() + b.clone()) + c.clone(),
            a + (b + c)
        );
    }

    #[test]
    fn variance_uses_the_population_formulation() {
        // Outcomes 10 and -10, evenly: mean 0, variance 100.
        let result = result_of(&[10, -10]);
        assert_eq!(result.sample_variance().unwrap(), 100.0);
        assert_eq!(result.sample_std_deviation().unwrap(), 10.0);
    }

    #[test]
    fn confidence_interval_brackets_the_mean() {
        let result = result_of(&[10, -10, 10, -10]);
        let (low, high) = result.confidence_interval_95().unwrap();
        let expected_margin = 1.96 * 10.0 / 2.0;
        assert!((low + expected_margin).abs() < 1e-9);
        assert!((high - expected_margin).abs() < 1e-9);
    }

    #[test]
    fn profitable_fraction_counts_break_even_games() {
        let result = result_of(&[10, 0, -10, -10]);
        assert_eq!(result.profitable_fraction().unwrap(), 0.5);
    }

    #[test]
    fn range_spans_the_observed_outcomes() {
        let result = result_of(&[30, -20, 0]);
        assert_eq!(result.range(), Some((-20, 30)));
        assert_eq!(SimulationResult::new().range(), None);
    }

    #[test]
    fn empty_distributions_refuse_to_divide() {
        let empty = SimulationResult::new();
        assert_eq!(
            empty.expected_winnings().unwrap_err(),
            SimulationError::NoRecordedGames
        );
        assert_eq!(
            empty.profitable_fraction().unwrap_err(),
            SimulationError::NoRecordedGames
        );
        assert!(empty.sample_variance().is_err());
    }

    #[test]
    fn summing_many_partial_results_matches_one_big_fold() {
        let partials = vec![
            result_of(&[10, -10]),
            result_of(&[0]),
            SimulationResult::from_outcome(20),
        ];
        let merged: SimulationResult = partials.into_iter().sum();
        assert_eq!(merged, result_of(&[10, -10, 0, 20]));
    }
}
