//! Parametric distribution families and their column records

use crate::data::DataArray;
use crate::error::{Result, StoreError};
use std::fmt;

/// Attribute naming the family of a stored distribution group
pub const DISTRIBUTION_TYPE: &str = "Distribution Type";

pub const ALPHA: &str = "Alpha";
pub const BETA: &str = "Beta";
pub const EXP_K: &str = "K";
pub const AVERAGE: &str = "Average";
pub const STANDARD_DEVIATION: &str = "Standard Deviation";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DistributionType {
    Beta,
    LogNormal,
    Power,
    #[default]
    Unknown,
}

impl DistributionType {
    pub const ALL: [DistributionType; 4] = [
        DistributionType::Beta,
        DistributionType::LogNormal,
        DistributionType::Power,
        DistributionType::Unknown,
    ];

    /// Name stored in the `Distribution Type` attribute
    pub fn name(self) -> &'static str {
        match self {
            DistributionType::Beta => "Beta Distribution",
            DistributionType::LogNormal => "Log Normal Distribution",
            DistributionType::Power => "Power Law Distribution",
            DistributionType::Unknown => "Unknown Distribution",
        }
    }

    /// Inverse of [`name`](Self::name); unrecognized names map to `Unknown`
    pub fn from_name(name: &str) -> Self {
        match name {
            "Beta Distribution" => DistributionType::Beta,
            "Log Normal Distribution" => DistributionType::LogNormal,
            "Power Law Distribution" => DistributionType::Power,
            _ => DistributionType::Unknown,
        }
    }

    /// Parameter columns of the family, in storage order
    pub fn column_names(self) -> &'static [&'static str] {
        match self {
            DistributionType::Beta => &[ALPHA, BETA],
            DistributionType::Power => &[ALPHA, EXP_K, BETA],
            DistributionType::LogNormal => &[AVERAGE, STANDARD_DEVIATION],
            DistributionType::Unknown => &[],
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Empty, correctly named parameter columns for `family`
pub fn create_distribution_vector(family: DistributionType) -> Vec<DataArray<f32>> {
    family
        .column_names()
        .iter()
        .map(|&name| DataArray::new(name, 0, 1))
        .collect()
}

/// One distribution: its family plus one `f32` column per family parameter,
/// one value per bin
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRecord {
    family: DistributionType,
    columns: Vec<DataArray<f32>>,
}

impl Default for DistributionRecord {
    fn default() -> Self {
        Self::new(DistributionType::Unknown)
    }
}

impl DistributionRecord {
    /// Record with empty columns
    pub fn new(family: DistributionType) -> Self {
        Self {
            family,
            columns: create_distribution_vector(family),
        }
    }

    /// Record filled column by column, in the family's column order
    pub fn from_values(family: DistributionType, values: Vec<Vec<f32>>) -> Result<Self> {
        let names = family.column_names();
        if values.len() != names.len() {
            return Err(StoreError::DistributionShape {
                group: family.name().to_string(),
                column: "<columns>".to_string(),
                expected: names.len(),
                actual: values.len(),
            });
        }
        let columns = names
            .iter()
            .zip(values)
            .map(|(&name, v)| DataArray::from_column(name, v))
            .collect();
        let record = Self { family, columns };
        record.validate(family.name())?;
        Ok(record)
    }

    pub fn family(&self) -> DistributionType {
        self.family
    }

    pub fn columns(&self) -> &[DataArray<f32>] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [DataArray<f32>] {
        &mut self.columns
    }

    pub fn column(&self, name: &str) -> Option<&DataArray<f32>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Replace the values of column `name`; returns false when the family has no such column
    pub fn set_column(&mut self, name: &str, values: Vec<f32>) -> bool {
        match self.columns.iter_mut().find(|c| c.name() == name) {
            Some(column) => {
                *column = DataArray::from_column(name, values);
                true
            }
            None => false,
        }
    }

    /// Number of bins, taken from the first column
    pub fn num_bins(&self) -> usize {
        self.columns.first().map_or(0, DataArray::num_tuples)
    }

    /// Check that every column has the same length
    pub fn validate(&self, group: &str) -> Result<()> {
        let expected = self.num_bins();
        match self.columns.iter().find(|c| c.num_tuples() != expected) {
            Some(c) => Err(StoreError::DistributionShape {
                group: group.to_string(),
                column: c.name().to_string(),
                expected,
                actual: c.num_tuples(),
            }),
            None => Ok(()),
        }
    }

    /// First column holding no values, if any
    pub fn first_empty_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.is_empty())
            .map(DataArray::name)
    }
}
