//! Co-indexed weight tables attached to orientation statistics

use crate::data::DataArray;
use crate::error::{Result, StoreError};

pub const ANGLE: &str = "Angle";
pub const AXIS: &str = "Axis";
pub const WEIGHT: &str = "Weight";
pub const EULER_1: &str = "Euler 1";
pub const EULER_2: &str = "Euler 2";
pub const EULER_3: &str = "Euler 3";
pub const SIGMA: &str = "Sigma";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightKind {
    /// Misorientation distribution weights
    Mdf,
    /// Orientation distribution weights
    Odf,
    /// Axis orientation distribution weights
    AxisOdf,
}

impl WeightKind {
    pub const ALL: [WeightKind; 3] = [WeightKind::Mdf, WeightKind::Odf, WeightKind::AxisOdf];

    /// Group the table is stored under
    pub fn group_name(self) -> &'static str {
        match self {
            WeightKind::Mdf => "MDF-Weights",
            WeightKind::Odf => "ODF-Weights",
            WeightKind::AxisOdf => "AxisODF-Weights",
        }
    }

    /// Column names with their component counts, in table order
    pub fn columns(self) -> &'static [(&'static str, usize)] {
        match self {
            WeightKind::Mdf => &[(ANGLE, 1), (AXIS, 3), (WEIGHT, 1)],
            WeightKind::Odf => &[
                (EULER_1, 1),
                (EULER_2, 1),
                (EULER_3, 1),
                (WEIGHT, 1),
                (SIGMA, 1),
            ],
            WeightKind::AxisOdf => &[
                (EULER_1, 1),
                (EULER_2, 1),
                (EULER_3, 1),
                (SIGMA, 1),
                (WEIGHT, 1),
            ],
        }
    }
}

/// Columns that all describe the same entries: row `i` of every column
/// belongs to weight entry `i`
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    kind: WeightKind,
    columns: Vec<DataArray<f32>>,
}

impl WeightTable {
    /// Table with empty columns
    pub fn new(kind: WeightKind) -> Self {
        let columns = kind
            .columns()
            .iter()
            .map(|&(name, comps)| DataArray::new(name, 0, comps))
            .collect();
        Self { kind, columns }
    }

    /// Table filled column by column, in the kind's column order
    pub fn from_values(kind: WeightKind, values: Vec<Vec<f32>>) -> Result<Self> {
        let specs = kind.columns();
        if values.len() != specs.len() {
            return Err(StoreError::WeightTableShape {
                table: kind.group_name().to_string(),
                column: "<columns>".to_string(),
                expected: specs.len(),
                actual: values.len(),
            });
        }
        let columns = specs
            .iter()
            .zip(values)
            .map(|(&(name, comps), v)| DataArray::from_vec(name, comps, v))
            .collect::<Result<Vec<_>>>()?;
        let table = Self { kind, columns };
        table.validate()?;
        Ok(table)
    }

    pub fn kind(&self) -> WeightKind {
        self.kind
    }

    pub fn columns(&self) -> &[DataArray<f32>] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&DataArray<f32>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Replace one column, keeping its component count
    pub fn set_column(&mut self, column: DataArray<f32>) -> Result<()> {
        let slot = self
            .columns
            .iter_mut()
            .find(|c| c.name() == column.name())
            .ok_or_else(|| {
                StoreError::missing(format!("{}/{}", self.kind.group_name(), column.name()))
            })?;
        if slot.num_components() != column.num_components() {
            return Err(StoreError::ShapeMismatch {
                name: column.name().to_string(),
                expected: slot.num_components(),
                actual: column.num_components(),
            });
        }
        *slot = column;
        Ok(())
    }

    /// Number of weight entries, taken from the first column
    pub fn num_tuples(&self) -> usize {
        self.columns.first().map_or(0, DataArray::num_tuples)
    }

    /// Check that every column has the same number of tuples
    pub fn validate(&self) -> Result<()> {
        let expected = self.num_tuples();
        match self.columns.iter().find(|c| c.num_tuples() != expected) {
            Some(c) => Err(StoreError::WeightTableShape {
                table: self.kind.group_name().to_string(),
                column: c.name().to_string(),
                expected,
                actual: c.num_tuples(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdf_columns_are_co_indexed() {
        let table = WeightTable::from_values(
            WeightKind::Mdf,
            vec![
                vec![60.0, 45.0],
                vec![1.0, 1.0, 1.0, 0.0, 0.0, 1.0],
                vec![0.5, 0.5],
            ],
        )
        .unwrap();
        assert_eq!(table.num_tuples(), 2);
        assert_eq!(table.column(AXIS).unwrap().num_components(), 3);
        assert_eq!(table.column(AXIS).unwrap().tuple(1), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn mismatched_column_fails() {
        let err = WeightTable::from_values(
            WeightKind::Odf,
            vec![vec![1.0], vec![1.0], vec![1.0], vec![1.0, 2.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            StoreError::WeightTableShape { ref column, expected: 1, actual: 2, .. } if column == WEIGHT
        ));
    }

    #[test]
    fn set_column_checks_components() {
        let mut table = WeightTable::new(WeightKind::Mdf);
        assert!(table.set_column(DataArray::from_column(ANGLE, vec![1.0])).is_ok());
        assert!(matches!(
            table.set_column(DataArray::from_column(AXIS, vec![1.0, 2.0, 3.0])),
            Err(StoreError::ShapeMismatch { expected: 3, actual: 1, .. })
        ));
        assert!(matches!(
            table.set_column(DataArray::from_column(SIGMA, vec![1.0])),
            Err(StoreError::MissingObject { .. })
        ));
        assert!(table.validate().is_err());
    }

    #[test]
    fn axis_odf_order() {
        let names: Vec<_> = WeightTable::new(WeightKind::AxisOdf)
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Euler 1", "Euler 2", "Euler 3", "Sigma", "Weight"]);
    }
}
