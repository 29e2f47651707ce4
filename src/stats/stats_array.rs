//! Ensemble-level array of per-phase statistics

use super::phase::PhaseStats;
use std::collections::BTreeMap;

/// Reserved name of the statistics array in an ensemble matrix
pub const STATISTICS: &str = "Statistics";

/// One optional [`PhaseStats`] per ensemble tuple.
///
/// Tuple 0 is a placeholder by convention; real phases start at 1. Only
/// tuples that carry statistics are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsDataArray {
    name: String,
    num_tuples: usize,
    phases: BTreeMap<usize, PhaseStats>,
}

impl Default for StatsDataArray {
    fn default() -> Self {
        Self::new(STATISTICS, 0)
    }
}

impl StatsDataArray {
    pub fn new(name: impl Into<String>, num_tuples: usize) -> Self {
        Self {
            name: name.into(),
            num_tuples,
            phases: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_tuples(&self) -> usize {
        self.num_tuples
    }

    pub fn get(&self, phase: usize) -> Option<&PhaseStats> {
        self.phases.get(&phase)
    }

    pub fn get_mut(&mut self, phase: usize) -> Option<&mut PhaseStats> {
        self.phases.get_mut(&phase)
    }

    /// Store statistics for `phase`, growing the array when needed
    pub fn set(&mut self, phase: usize, stats: PhaseStats) {
        self.num_tuples = self.num_tuples.max(phase.saturating_add(1));
        self.phases.insert(phase, stats);
    }

    /// Phases that carry statistics, with their indices
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PhaseStats)> {
        self.phases.iter().map(|(&i, p)| (i, p))
    }

    /// Change the tuple count, dropping statistics past the new end
    pub fn resize(&mut self, num_tuples: usize) {
        self.phases.retain(|&i, _| i < num_tuples);
        self.num_tuples = num_tuples;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PhaseType;

    #[test]
    fn set_grows_and_iter_skips_empty() {
        let mut stats = StatsDataArray::default();
        assert_eq!(stats.name(), STATISTICS);
        stats.set(2, PhaseStats::new(PhaseType::Matrix));
        assert_eq!(stats.num_tuples(), 3);
        assert!(stats.get(0).is_none());
        assert_eq!(stats.get(2).unwrap().phase_type, PhaseType::Matrix);
        assert_eq!(stats.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![2]);

        stats.resize(2);
        assert!(stats.get(2).is_none());
    }

    #[test]
    fn large_tuple_counts_stay_sparse() {
        let mut stats = StatsDataArray::new("Statistics", usize::MAX);
        stats.set(3, PhaseStats::new(PhaseType::Primary));
        assert_eq!(stats.num_tuples(), usize::MAX);
        assert_eq!(stats.iter().count(), 1);

        stats.resize(2);
        assert_eq!(stats.num_tuples(), 2);
        assert!(stats.get(3).is_none());
    }
}
