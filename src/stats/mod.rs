//! Phase statistics: distribution records, weight tables and per-phase aggregates

pub mod distribution;
pub mod phase;
pub mod stats_array;
pub mod weights;

pub use distribution::{DistributionRecord, DistributionType, create_distribution_vector};
pub use phase::{DistributionSlot, MAX_BINS, PhaseStats, PhaseType, generate_bin_numbers};
pub use stats_array::{STATISTICS, StatsDataArray};
pub use weights::{WeightKind, WeightTable};
