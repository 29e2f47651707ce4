//! Per-phase statistics aggregate

use super::distribution::DistributionRecord;
use super::weights::WeightTable;
use crate::data::DataArray;
use crate::error::{Result, StoreError};

pub const BIN_NUMBER: &str = "BinNumber";
pub const MISORIENTATION_BINS: &str = "MisorientationBins";
pub const ODF: &str = "ODF";
pub const AXIS_ORIENTATION: &str = "AxisOrientation";

/// Upper bound on the bins [`generate_bin_numbers`] will produce
pub const MAX_BINS: usize = 1 << 20;

/// Role of a phase in the microstructure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PhaseType {
    #[default]
    Primary = 0,
    Precipitate = 1,
    Transformation = 2,
    Matrix = 3,
    Boundary = 4,
}

impl PhaseType {
    pub const ALL: [PhaseType; 5] = [
        PhaseType::Primary,
        PhaseType::Precipitate,
        PhaseType::Transformation,
        PhaseType::Matrix,
        PhaseType::Boundary,
    ];

    pub fn from_u32(v: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| *t as u32 == v)
    }

    /// Name stored in the `StatsType` attribute of a phase group
    pub fn stats_type(self) -> &'static str {
        match self {
            PhaseType::Primary => "PrimaryStatsData",
            PhaseType::Precipitate => "PrecipitateStatsData",
            PhaseType::Transformation => "TransformationStatsData",
            PhaseType::Matrix => "MatrixStatsData",
            PhaseType::Boundary => "BoundaryStatsData",
        }
    }

    pub fn from_stats_type(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.stats_type() == name)
    }
}

/// The five size-correlated distributions every phase carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionSlot {
    FeatureSize,
    BOverA,
    COverA,
    Neighbors,
    Omega3,
}

impl DistributionSlot {
    pub const ALL: [DistributionSlot; 5] = [
        DistributionSlot::FeatureSize,
        DistributionSlot::BOverA,
        DistributionSlot::COverA,
        DistributionSlot::Neighbors,
        DistributionSlot::Omega3,
    ];

    pub fn group_name(self) -> &'static str {
        match self {
            DistributionSlot::FeatureSize => "FeatureSize Distribution",
            DistributionSlot::BOverA => "FeatureSize Vs B Over A Distributions",
            DistributionSlot::COverA => "FeatureSize Vs C Over A Distributions",
            DistributionSlot::Neighbors => "FeatureSize Vs Neighbors Distributions",
            DistributionSlot::Omega3 => "FeatureSize Vs Omega3 Distributions",
        }
    }
}

/// Statistics describing one phase
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseStats {
    pub phase_type: PhaseType,
    pub boundary_area: f32,
    pub phase_fraction: f32,
    pub parent_phase: u32,
    pub precipitate_boundary_fraction: Option<f32>,
    /// `[bin_step, max_diameter, min_diameter]`
    pub feature_diameter_info: [f32; 3],
    pub bin_numbers: Option<DataArray<f32>>,
    pub feature_size: DistributionRecord,
    pub b_over_a: DistributionRecord,
    pub c_over_a: DistributionRecord,
    pub neighbors: DistributionRecord,
    pub omega3: DistributionRecord,
    pub misorientation_bins: Option<DataArray<f32>>,
    pub mdf_weights: Option<WeightTable>,
    pub odf: Option<DataArray<f32>>,
    pub odf_weights: Option<WeightTable>,
    pub axis_orientation: Option<DataArray<f32>>,
    pub axis_odf_weights: Option<WeightTable>,
}

impl PhaseStats {
    pub fn new(phase_type: PhaseType) -> Self {
        Self {
            phase_type,
            ..Self::default()
        }
    }

    pub fn distribution(&self, slot: DistributionSlot) -> &DistributionRecord {
        match slot {
            DistributionSlot::FeatureSize => &self.feature_size,
            DistributionSlot::BOverA => &self.b_over_a,
            DistributionSlot::COverA => &self.c_over_a,
            DistributionSlot::Neighbors => &self.neighbors,
            DistributionSlot::Omega3 => &self.omega3,
        }
    }

    pub fn distribution_mut(&mut self, slot: DistributionSlot) -> &mut DistributionRecord {
        match slot {
            DistributionSlot::FeatureSize => &mut self.feature_size,
            DistributionSlot::BOverA => &mut self.b_over_a,
            DistributionSlot::COverA => &mut self.c_over_a,
            DistributionSlot::Neighbors => &mut self.neighbors,
            DistributionSlot::Omega3 => &mut self.omega3,
        }
    }

    /// Fill in `bin_numbers` from the diameter info when absent
    pub fn ensure_bin_numbers(&mut self) -> Result<&DataArray<f32>> {
        let bins = match self.bin_numbers.take() {
            Some(bins) => bins,
            None => generate_bin_numbers(self.feature_diameter_info)?,
        };
        Ok(self.bin_numbers.insert(bins))
    }
}

/// Bin lower bounds `min + i·step` for every `i` whose bound does not exceed `max`.
///
/// `info` is `[bin_step, max_diameter, min_diameter]`. The step must be finite
/// and positive, and the range may hold at most [`MAX_BINS`] bins; an empty
/// array results when `min > max` or either bound is not finite.
pub fn generate_bin_numbers(info: [f32; 3]) -> Result<DataArray<f32>> {
    let [step, max, min] = info;
    if !step.is_finite() || step <= 0.0 {
        return Err(StoreError::InvalidBinStep(step));
    }
    let too_many = || StoreError::TooManyBins {
        step,
        min,
        max,
        limit: MAX_BINS,
    };

    let mut bins = Vec::new();
    if min.is_finite() && max.is_finite() {
        if (f64::from(max) - f64::from(min)) / f64::from(step) >= MAX_BINS as f64 {
            return Err(too_many());
        }
        // f32 rounding can stall `min + i·step` below `max` for tiny steps
        for i in 0u32.. {
            let bin = min + i as f32 * step;
            if bin > max {
                break;
            }
            if bins.len() == MAX_BINS {
                return Err(too_many());
            }
            bins.push(bin);
        }
    } else {
        log::warn!("diameter range [{min}, {max}] is not finite, no bins generated");
    }
    Ok(DataArray::from_column(BIN_NUMBER, bins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_are_inclusive_of_max() {
        let bins = generate_bin_numbers([2.0, 10.0, 0.0]).unwrap();
        assert_eq!(bins.name(), BIN_NUMBER);
        assert_eq!(bins.as_slice(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let bins = generate_bin_numbers([3.0, 10.0, 1.0]).unwrap();
        assert_eq!(bins.as_slice(), &[1.0, 4.0, 7.0, 10.0]);
    }

    #[test]
    fn bins_are_deterministic() {
        let info = [0.25, 7.5, 1.3];
        assert_eq!(
            generate_bin_numbers(info).unwrap(),
            generate_bin_numbers(info).unwrap()
        );
    }

    #[test]
    fn invalid_step_rejected() {
        for step in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                generate_bin_numbers([step, 10.0, 0.0]),
                Err(StoreError::InvalidBinStep(_))
            ));
        }
    }

    #[test]
    fn empty_or_unbounded_range() {
        assert!(generate_bin_numbers([1.0, 0.0, 5.0]).unwrap().is_empty());
        assert!(generate_bin_numbers([1.0, f32::INFINITY, 0.0]).unwrap().is_empty());
    }

    #[test]
    fn ensure_generates_once() {
        let mut stats = PhaseStats::new(PhaseType::Precipitate);
        stats.feature_diameter_info = [2.0, 4.0, 0.0];
        assert_eq!(stats.ensure_bin_numbers().unwrap().as_slice(), &[0.0, 2.0, 4.0]);

        // an existing array is left alone
        stats.feature_diameter_info = [1.0, 9.0, 0.0];
        assert_eq!(stats.ensure_bin_numbers().unwrap().len(), 3);
    }

    #[test]
    fn phase_type_names() {
        for t in PhaseType::ALL {
            assert_eq!(PhaseType::from_stats_type(t.stats_type()), Some(t));
            assert_eq!(PhaseType::from_u32(t as u32), Some(t));
        }
        assert_eq!(PhaseType::from_u32(999), None);
    }

    #[test]
    fn bin_count_is_capped() {
        assert!(matches!(
            generate_bin_numbers([1e-9, 1e3, 0.0]),
            Err(StoreError::TooManyBins { limit: MAX_BINS, .. })
        ));
        // step far below the precision of the bounds
        assert!(matches!(
            generate_bin_numbers([1e-30, 1e30, 1e30]),
            Err(StoreError::TooManyBins { .. })
        ));
        assert_eq!(generate_bin_numbers([1.0, 1023.0, 0.0]).unwrap().len(), 1024);
    }
}
