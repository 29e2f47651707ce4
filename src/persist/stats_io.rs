//! Statistics persistence
//!
//! A statistics array is a group holding one subgroup per phase, named by
//! the phase index:
//!
//! ```text
//! Statistics/                       ObjectType = "StatsDataArray"
//!   1/                              StatsType = "PrimaryStatsData", PhaseType = 0
//!     BoundaryArea                  f32 [1]
//!     PhaseFraction                 f32 [1]
//!     Parent Phase                  u32 [1]
//!     Feature_Diameter_Info         f32 [3]
//!     FeatureSize Distribution/     Distribution Type = "Log Normal Distribution"
//!       Average                     f32 [bins, 1]
//!       Standard Deviation          f32 [bins, 1]
//!     BinNumber                     f32 [bins, 1]
//!     ...
//! ```

use super::array_io::{read_float_array, stamp, write_data_array_as};
use super::object_kind::{ObjectKind, TUPLE_COUNT};
use crate::config::UnknownObjectPolicy;
use crate::error::{Result, StoreError};
use crate::stats::distribution::DISTRIBUTION_TYPE;
use crate::stats::phase::{AXIS_ORIENTATION, BIN_NUMBER, MISORIENTATION_BINS, ODF};
use crate::stats::{
    DistributionRecord, DistributionSlot, DistributionType, PhaseStats, PhaseType, StatsDataArray,
    WeightKind, WeightTable, generate_bin_numbers,
};
use crate::types::Group;

pub const STATS_TYPE: &str = "StatsType";
pub const PHASE_TYPE: &str = "PhaseType";
pub const BOUNDARY_AREA: &str = "BoundaryArea";
pub const PHASE_FRACTION: &str = "PhaseFraction";
pub const PARENT_PHASE: &str = "Parent Phase";
pub const PRECIPITATE_BOUNDARY_FRACTION: &str = "Precipitate Boundary Fraction";
pub const FEATURE_DIAMETER_INFO: &str = "Feature_Diameter_Info";

/// Write `stats` as a group named after it
pub fn write_stats(parent: &mut Group, stats: &StatsDataArray) -> Result<()> {
    // fail before touching the container
    for (_, phase) in stats.iter() {
        check_phase(phase)?;
    }

    let group = parent.create_group(stats.name())?;
    stamp(
        &mut group.attributes,
        ObjectKind::StatsDataArray,
        1,
        stats.num_tuples(),
    );
    for (index, phase) in stats.iter() {
        let key = index.to_string();
        let phase_group = group.create_group(&key)?;
        phase_group.set_attribute(STATS_TYPE, phase.phase_type.stats_type())?;
        phase_group.set_attribute(PHASE_TYPE, phase.phase_type as i64)?;
        write_phase(phase_group, phase)?;
    }
    Ok(())
}

fn check_phase(phase: &PhaseStats) -> Result<()> {
    for slot in DistributionSlot::ALL {
        let record = phase.distribution(slot);
        if let Some(column) = record.first_empty_column() {
            return Err(StoreError::EmptyDistributionColumn {
                group: slot.group_name().to_string(),
                column: column.to_string(),
            });
        }
        record.validate(slot.group_name())?;
    }
    for table in [&phase.mdf_weights, &phase.odf_weights, &phase.axis_odf_weights]
        .into_iter()
        .flatten()
    {
        table.validate()?;
    }
    Ok(())
}

fn write_phase(group: &mut Group, phase: &PhaseStats) -> Result<()> {
    group.write_scalar(BOUNDARY_AREA, phase.boundary_area)?;
    group.write_scalar(PHASE_FRACTION, phase.phase_fraction)?;
    group.write_scalar(PARENT_PHASE, phase.parent_phase)?;
    if let Some(fraction) = phase.precipitate_boundary_fraction {
        group.write_scalar(PRECIPITATE_BOUNDARY_FRACTION, fraction)?;
    }
    group.write_slice(FEATURE_DIAMETER_INFO, vec![3], &phase.feature_diameter_info)?;

    write_distribution(group, DistributionSlot::FeatureSize, &phase.feature_size)?;

    let generated;
    let bins = match &phase.bin_numbers {
        Some(bins) => bins,
        None => {
            generated = generate_bin_numbers(phase.feature_diameter_info)?;
            &generated
        }
    };
    write_data_array_as(group, BIN_NUMBER, bins)?;

    for slot in [
        DistributionSlot::BOverA,
        DistributionSlot::COverA,
        DistributionSlot::Neighbors,
        DistributionSlot::Omega3,
    ] {
        write_distribution(group, slot, phase.distribution(slot))?;
    }

    if let Some(bins) = &phase.misorientation_bins {
        write_data_array_as(group, MISORIENTATION_BINS, bins)?;
    }
    if let Some(table) = &phase.mdf_weights {
        write_weights(group, table)?;
    }
    if let Some(odf) = &phase.odf {
        write_data_array_as(group, ODF, odf)?;
    }
    if let Some(table) = &phase.odf_weights {
        write_weights(group, table)?;
    }
    if let Some(axis) = &phase.axis_orientation {
        write_data_array_as(group, AXIS_ORIENTATION, axis)?;
    }
    if let Some(table) = &phase.axis_odf_weights {
        write_weights(group, table)?;
    }
    Ok(())
}

fn write_distribution(
    parent: &mut Group,
    slot: DistributionSlot,
    record: &DistributionRecord,
) -> Result<()> {
    let group = parent.create_group(slot.group_name())?;
    group.set_attribute(DISTRIBUTION_TYPE, record.family().name())?;
    for (name, column) in record.family().column_names().iter().zip(record.columns()) {
        write_data_array_as(group, name, column)?;
    }
    Ok(())
}

fn write_weights(parent: &mut Group, table: &WeightTable) -> Result<()> {
    let group = parent.create_group(table.kind().group_name())?;
    for ((name, _), column) in table.kind().columns().iter().zip(table.columns()) {
        write_data_array_as(group, name, column)?;
    }
    Ok(())
}

/// Read a statistics group written by [`write_stats`].
///
/// Every phase group must fall inside the stored `TupleCount`.
pub fn read_stats(group: &Group, name: &str, policy: UnknownObjectPolicy) -> Result<StatsDataArray> {
    let declared = match group.attribute(TUPLE_COUNT).and_then(|a| a.as_int()) {
        Some(n) => Some(usize::try_from(n).map_err(|_| StoreError::AttributeType {
            object: name.to_string(),
            attribute: TUPLE_COUNT.to_string(),
            expected: "non-negative integer",
        })?),
        None => None,
    };
    let limit = declared.unwrap_or(usize::MAX);

    let mut stats = StatsDataArray::new(name, declared.unwrap_or(0));
    for key in group.child_names() {
        let Ok(index) = key.parse::<usize>() else {
            log::debug!("ignoring non-phase child '{key}' of '{name}'");
            continue;
        };
        if index >= limit {
            return Err(StoreError::PhaseIndexOutOfRange {
                name: name.to_string(),
                index,
                tuples: limit,
            });
        }
        let phase_group = group.open_group(key)?;
        let Some(phase_type) = resolve_phase_type(phase_group) else {
            let tag = phase_group.string_attribute(STATS_TYPE).unwrap_or_default();
            match policy {
                UnknownObjectPolicy::Skip => {
                    log::warn!("skipping phase {index} of '{name}' with unknown stats type {tag:?}");
                    continue;
                }
                UnknownObjectPolicy::Fail => {
                    return Err(StoreError::UnknownObjectType {
                        name: format!("{name}/{key}"),
                        tag: tag.to_string(),
                    });
                }
            }
        };
        stats.set(index, read_phase(phase_group, phase_type)?);
    }
    Ok(stats)
}

fn resolve_phase_type(group: &Group) -> Option<PhaseType> {
    match group.string_attribute(STATS_TYPE) {
        Some(tag) => PhaseType::from_stats_type(tag),
        None => group
            .attribute(PHASE_TYPE)
            .and_then(|a| a.as_int())
            .and_then(|v| u32::try_from(v).ok())
            .and_then(PhaseType::from_u32),
    }
}

fn read_phase(group: &Group, phase_type: PhaseType) -> Result<PhaseStats> {
    let mut phase = PhaseStats::new(phase_type);
    phase.boundary_area = group.read_scalar(BOUNDARY_AREA)?;
    phase.phase_fraction = group.read_scalar(PHASE_FRACTION)?;
    phase.parent_phase = group.read_scalar(PARENT_PHASE)?;
    if group.contains(PRECIPITATE_BOUNDARY_FRACTION) {
        phase.precipitate_boundary_fraction =
            Some(group.read_scalar(PRECIPITATE_BOUNDARY_FRACTION)?);
    }

    let info = group.read_vec::<f32>(FEATURE_DIAMETER_INFO)?;
    phase.feature_diameter_info = info.as_slice().try_into().map_err(|_| StoreError::ShapeMismatch {
        name: FEATURE_DIAMETER_INFO.to_string(),
        expected: 3,
        actual: info.len(),
    })?;

    if group.contains(BIN_NUMBER) {
        phase.bin_numbers = Some(read_float_array(group, BIN_NUMBER)?);
    }
    for slot in DistributionSlot::ALL {
        *phase.distribution_mut(slot) = read_distribution(group, slot)?;
    }

    phase.misorientation_bins = read_optional(group, MISORIENTATION_BINS)?;
    phase.mdf_weights = read_weights(group, WeightKind::Mdf)?;
    phase.odf = read_optional(group, ODF)?;
    phase.odf_weights = read_weights(group, WeightKind::Odf)?;
    phase.axis_orientation = read_optional(group, AXIS_ORIENTATION)?;
    phase.axis_odf_weights = read_weights(group, WeightKind::AxisOdf)?;
    Ok(phase)
}

fn read_optional(
    group: &Group,
    name: &str,
) -> Result<Option<crate::data::DataArray<f32>>> {
    if group.contains(name) {
        read_float_array(group, name).map(Some)
    } else {
        Ok(None)
    }
}

fn read_distribution(parent: &Group, slot: DistributionSlot) -> Result<DistributionRecord> {
    let group_name = slot.group_name();
    let group = parent.open_group(group_name)?;
    let family = match group.string_attribute(DISTRIBUTION_TYPE) {
        Some(name) => DistributionType::from_name(name),
        None => {
            return Err(StoreError::MissingAttribute {
                object: group_name.to_string(),
                attribute: DISTRIBUTION_TYPE.to_string(),
            });
        }
    };

    let mut record = DistributionRecord::new(family);
    for column in record.columns_mut() {
        let name = column.name().to_string();
        *column = read_float_array(group, &name)?;
    }
    record.validate(group_name)?;
    Ok(record)
}

fn read_weights(parent: &Group, kind: WeightKind) -> Result<Option<WeightTable>> {
    if !parent.is_group(kind.group_name()) {
        return Ok(None);
    }
    let group = parent.open_group(kind.group_name())?;
    let mut table = WeightTable::new(kind);
    for (name, _) in kind.columns() {
        table.set_column(read_float_array(group, name)?)?;
    }
    table.validate()?;
    Ok(Some(table))
}
