//! Integration tests for tuplevault
//!
//! These tests exercise the store end to end: build the data model, write
//! it to a container file, open the file again and read it back.

use std::collections::HashSet;
use std::path::PathBuf;
use tuplevault::persist::{
    OBJECT_KIND, OBJECT_TYPE, TUPLE_COUNT, read_data_containers, write_data_containers,
};
use tuplevault::stats::generate_bin_numbers;
use tuplevault::types::{FILE_VERSION, HEADER_SIZE, MAGIC, VERSION};
use tuplevault::{
    AttributeArray, AttributeMatrix, AttributeMatrixType, ContainerFile, DataArray, DataContainer,
    DistributionRecord, DistributionSlot, DistributionType, DynamicListArray, Group, ImageGeometry,
    NeighborList, PhaseStats, PhaseType, ReadOptions, StatsDataArray, StoreConfig, StoreError,
    StringDataArray, SurfaceMesh, TupleCountPolicy, UnknownObjectPolicy, WeightKind, WeightTable,
    parse, writer,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Unique path in the temp dir, removed when dropped
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str) -> Self {
        init_logging();
        let path = std::env::temp_dir().join(format!(
            "tuplevault-it-{}-{name}.tvault",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        TempFile(path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

fn round_trip(tmp: &TempFile, containers: &[DataContainer], options: &ReadOptions) -> Vec<DataContainer> {
    {
        let mut file = ContainerFile::create(&tmp.0).unwrap();
        write_data_containers(&mut file, containers).unwrap();
        file.close().unwrap();
    }
    let file = ContainerFile::open_read_only(&tmp.0).unwrap();
    read_data_containers(&file, options).unwrap()
}

// =============================================================================
// Typed arrays
// =============================================================================

fn every_element_type(tuples: usize) -> AttributeMatrix {
    let mut m = AttributeMatrix::new("CellData", AttributeMatrixType::Cell, tuples);
    let t = tuples;
    m.add_array("i8", DataArray::from_vec("i8", 1, (0..t).map(|i| i as i8 - 3).collect()).unwrap());
    m.add_array("u8", DataArray::from_vec("u8", 1, (0..t).map(|i| i as u8).collect()).unwrap());
    m.add_array("i16", DataArray::from_vec("i16", 1, (0..t).map(|i| -(i as i16)).collect()).unwrap());
    m.add_array("u16", DataArray::from_vec("u16", 1, (0..t).map(|i| i as u16 * 300).collect()).unwrap());
    m.add_array("i32", DataArray::from_vec("i32", 2, (0..2 * t).map(|i| i as i32 - 5).collect()).unwrap());
    m.add_array("u32", DataArray::from_vec("u32", 1, (0..t).map(|i| i as u32 * 70_000).collect()).unwrap());
    m.add_array("i64", DataArray::from_vec("i64", 1, (0..t).map(|i| i64::MIN + i as i64).collect()).unwrap());
    m.add_array("u64", DataArray::from_vec("u64", 1, (0..t).map(|i| u64::MAX - i as u64).collect()).unwrap());
    m.add_array("f32", DataArray::from_vec("f32", 3, (0..3 * t).map(|i| i as f32 * 0.25).collect()).unwrap());
    m.add_array("f64", DataArray::from_vec("f64", 1, (0..t).map(|i| i as f64 / 3.0).collect()).unwrap());
    m.add_array("bool", DataArray::from_vec("bool", 1, (0..t).map(|i| i % 2 == 0).collect()).unwrap());
    m.add_array(
        "Names",
        StringDataArray::from_vec("Names", (0..t).map(|i| format!("grain {i}")).collect()),
    );
    m
}

#[test]
fn roundtrip_every_element_type() {
    let tmp = TempFile::new("every-type");
    let mut dc = DataContainer::new("VolumeDataContainer");
    dc.add_matrix(every_element_type(6));

    let back = round_trip(&tmp, &[dc.clone()], &ReadOptions::default());
    assert_eq!(back, vec![dc]);

    let cells = back[0].matrix("CellData").unwrap();
    assert_eq!(cells.tuple_count(), 6);
    let euler = cells.get_typed::<f32>("f32").unwrap();
    assert_eq!(euler.num_components(), 3);
    assert_eq!(euler.tuple(2), &[1.5, 1.75, 2.0]);
    assert_eq!(cells.get_array("Names").unwrap().as_strings().unwrap().get(5), Some("grain 5"));
}

#[test]
fn roundtrip_zero_tuple_arrays() {
    let tmp = TempFile::new("zero-tuples");
    let mut dc = DataContainer::new("dc");
    dc.add_matrix(every_element_type(0));

    let back = round_trip(&tmp, &[dc.clone()], &ReadOptions::default());
    assert_eq!(back, vec![dc]);
    let cells = back[0].matrix("CellData").unwrap();
    assert_eq!(cells.get_typed::<f32>("f32").unwrap().num_components(), 3);
}

// =============================================================================
// Attribute matrices
// =============================================================================

#[test]
fn resize_propagates_to_every_member() {
    let mut m = every_element_type(4);
    m.add_array(
        "Neighbors",
        NeighborList::from_lists("Neighbors", DynamicListArray::from_lists(&[vec![1], vec![0, 2], vec![], vec![2]])),
    );
    m.resize(4);

    for new_count in [9, 2, 0, 5] {
        m.resize(new_count);
        assert_eq!(m.tuple_count(), new_count);
        for (name, array) in m.iter() {
            assert_eq!(array.num_tuples(), new_count, "array {name}");
        }
    }
    m.validate().unwrap();
}

#[test]
fn insert_replaces_and_adopts_tuple_count() {
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Feature, 10);
    m.add_array("X", DataArray::<f32>::new("X", 10, 1));
    let b = DataArray::from_vec("X", 1, vec![1i32, 2, 3]).unwrap();
    m.add_array("X", b.clone());

    assert_eq!(m.get_typed::<i32>("X"), Some(&b));
    assert_eq!(m.tuple_count(), 3);
    assert_eq!(m.len(), 1);
}

#[test]
fn add_array_renames_to_key() {
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Vertex, 2);
    m.add_array("Normals", DataArray::<f64>::new("scratch", 2, 3));
    assert_eq!(m.get_array("Normals").unwrap().name(), "Normals");
}

#[test]
fn try_add_array_rejects_mismatch() {
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 0);
    m.try_add_array("A", DataArray::<u8>::new("A", 8, 1)).unwrap();
    let err = m.try_add_array("B", DataArray::<u8>::new("B", 7, 1)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::TupleCountMismatch { expected: 8, actual: 7, .. }
    ));
    // replacing the only member may change the count
    m.try_add_array("A", DataArray::<u8>::new("A", 7, 1)).unwrap();
    assert_eq!(m.tuple_count(), 7);
}

#[test]
fn remove_array_keeps_tuple_count() {
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 5);
    m.add_array("A", DataArray::<u8>::new("A", 5, 1));
    assert!(m.remove_array("A").is_some());
    assert!(m.is_empty());
    assert_eq!(m.tuple_count(), 5);
}

#[test]
fn names_to_read_returns_exactly_one_array() {
    init_logging();
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 100);
    m.add_array("Phases", DataArray::<i32>::new("Phases", 100, 1));
    m.add_array("Quats", DataArray::<f32>::new("Quats", 100, 4));

    let mut group = Group::new();
    m.write_all_to(&mut group).unwrap();

    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 0);
    let names = HashSet::from(["Quats".to_string()]);
    back.read_all_from(&group, Some(&names), false).unwrap();

    assert_eq!(back.list_names(), vec!["Quats"]);
    assert_eq!(back.tuple_count(), 100);
    assert_eq!(back.get_array("Quats").unwrap().num_tuples(), 100);
}

#[test]
fn unknown_object_type_is_skipped() {
    init_logging();
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 3);
    m.add_array("Known", DataArray::<f32>::new("Known", 3, 1));
    let mut group = Group::new();
    m.write_all_to(&mut group).unwrap();

    group.write_slice("Other", vec![3, 1], &[1u8, 2, 3]).unwrap();
    group.write_string_attribute("Other", OBJECT_TYPE, "SparseGrid").unwrap();

    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 0);
    back.read_all_from(&group, None, false).unwrap();
    assert_eq!(back.list_names(), vec!["Known"]);

    let strict = StoreConfig {
        unknown_object_policy: UnknownObjectPolicy::Fail,
        ..StoreConfig::default()
    };
    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 0);
    assert!(matches!(
        back.read_with_options(&group, &strict.read_options()),
        Err(StoreError::UnknownObjectType { ref name, .. }) if name == "Other"
    ));
}

#[test]
fn unrecognized_element_name_falls_back_to_stored_dtype() {
    let mut group = Group::new();
    group.write_slice("Counts", vec![2, 1], &[4u16, 5]).unwrap();
    group
        .write_string_attribute("Counts", OBJECT_TYPE, "DataArray<unsigned short>")
        .unwrap();

    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Generic, 0);
    back.read_all_from(&group, None, false).unwrap();
    assert_eq!(back.get_typed::<u16>("Counts").unwrap().as_slice(), &[4, 5]);
}

#[test]
fn strict_tuple_count_policy_from_config() {
    let tmp = TempFile::new("strict-tuples");
    let mut dc = DataContainer::new("dc");
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Feature, 0);
    m.add_array("Big", DataArray::<f32>::new("Big", 10, 1));
    m.add_array("Small", DataArray::<f32>::new("Small", 4, 1));
    dc.add_matrix(m);

    let lenient = round_trip(&tmp, &[dc], &ReadOptions::default());
    assert_eq!(lenient[0].matrix("FIELD_DATA").unwrap().tuple_count(), 4);

    let config = StoreConfig::from_json_str(r#"{ "tuple_count_policy": "strict" }"#).unwrap();
    assert_eq!(config.tuple_count_policy, TupleCountPolicy::Strict);
    let file = ContainerFile::open_read_only(&tmp.0).unwrap();
    assert!(matches!(
        read_data_containers(&file, &config.read_options()),
        Err(StoreError::TupleCountMismatch { .. })
    ));
}

#[test]
fn preflight_yields_templates() {
    let tmp = TempFile::new("preflight");
    let mut dc = DataContainer::new("dc");
    dc.add_matrix(every_element_type(12));

    let back = round_trip(&tmp, &[dc], &ReadOptions::preflight());
    let cells = back[0].matrix("CellData").unwrap();
    assert_eq!(cells.tuple_count(), 12);
    assert_eq!(cells.len(), 12);
    for (name, array) in cells.iter() {
        assert_eq!(array.num_tuples(), 0, "array {name}");
    }
    assert_eq!(cells.get_array("i32").unwrap().num_components(), 2);
}

// =============================================================================
// Lists
// =============================================================================

#[test]
fn csr_lists_roundtrip_with_empty_lists() {
    let lists: Vec<Vec<i32>> = vec![vec![], vec![7], vec![], vec![1, -2, 3], vec![]];
    let dl = DynamicListArray::from_lists(&lists);
    let buffer = dl.serialize_links().unwrap();
    let back = DynamicListArray::deserialize_links(&buffer, lists.len()).unwrap();

    for (i, list) in lists.iter().enumerate() {
        assert_eq!(back.get_list(i), list.as_slice());
        assert_eq!(back.number_of_elements(i), list.len());
    }
    assert_eq!(back, dl);
}

#[test]
fn neighbor_lists_roundtrip_through_file() {
    let tmp = TempFile::new("neighbors");
    let lists = DynamicListArray::from_lists(&[vec![2, 3], vec![], vec![1, 3], vec![1, 2]]);
    let neighbors = NeighborList::from_lists("NeighborList", lists);

    let mut features = AttributeMatrix::with_default_name(AttributeMatrixType::Feature, 4);
    features.add_array("NumNeighbors", DataArray::from_column("NumNeighbors", neighbors.counts()));
    features.add_array("NeighborList", neighbors.clone());
    let mut dc = DataContainer::new("dc");
    dc.add_matrix(features);

    let back = round_trip(&tmp, &[dc.clone()], &ReadOptions::default());
    assert_eq!(back, vec![dc]);
    let read = back[0]
        .matrix("FIELD_DATA")
        .unwrap()
        .get_array("NeighborList")
        .and_then(AttributeArray::as_neighbor_list)
        .unwrap();
    assert_eq!(read.lists().get_list(2), &[1, 3]);
    assert!(read.lists().get_list(1).is_empty());
}

#[test]
fn conflicting_num_neighbors_fails_at_write_time() {
    let tmp = TempFile::new("neighbor-conflict");
    let neighbors = NeighborList::from_lists(
        "NeighborList",
        DynamicListArray::from_lists(&[vec![1, 2], vec![3]]),
    );

    for counts in [
        AttributeArray::from(DataArray::from_column("NumNeighbors", vec![1.5f32, 2.5])),
        AttributeArray::from(DataArray::from_column("NumNeighbors", vec![0i32, 0])),
    ] {
        let mut features = AttributeMatrix::with_default_name(AttributeMatrixType::Feature, 2);
        features.add_array("NeighborList", neighbors.clone());
        features.add_array("NumNeighbors", counts);
        let mut dc = DataContainer::new("dc");
        dc.add_matrix(features);

        let mut file = ContainerFile::create(&tmp.0).unwrap();
        assert!(matches!(
            write_data_containers(&mut file, &[dc]),
            Err(StoreError::NeighborCountConflict { .. })
        ));
    }
}

#[test]
fn mesh_lists_roundtrip_through_file() {
    let tmp = TempFile::new("mesh");
    let mut mesh = SurfaceMesh::default();
    mesh.vertices = DataArray::from_vec(
        "Vertices",
        3,
        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    )
    .unwrap();
    mesh.faces = DataArray::from_vec("Faces", 3, vec![0, 1, 2, 0, 1, 3, 0, 2, 3, 1, 2, 3]).unwrap();
    mesh.face_neighbors = Some(DynamicListArray::from_lists(&[
        vec![1, 2, 3],
        vec![0, 2, 3],
        vec![0, 1, 3],
        vec![0, 1, 2],
    ]));
    mesh.find_faces_containing_vert();

    let mut dc = DataContainer::new("SurfaceDataContainer");
    dc.mesh = Some(mesh);
    let back = round_trip(&tmp, &[dc.clone()], &ReadOptions::default());
    assert_eq!(back, vec![dc]);

    let links = back[0].mesh.as_ref().unwrap().faces_containing_vert.as_ref().unwrap();
    assert_eq!(links.get_list(3), &[1, 2, 3]);
}

// =============================================================================
// Statistics
// =============================================================================

fn record(family: DistributionType, bins: usize, seed: f32) -> DistributionRecord {
    let columns = family
        .column_names()
        .iter()
        .enumerate()
        .map(|(c, _)| (0..bins).map(|b| seed + c as f32 + b as f32 * 0.5).collect())
        .collect();
    DistributionRecord::from_values(family, columns).unwrap()
}

fn phase(phase_type: PhaseType, family: DistributionType) -> PhaseStats {
    let mut phase = PhaseStats::new(phase_type);
    phase.phase_fraction = 0.5;
    phase.boundary_area = 3.0;
    phase.feature_diameter_info = [2.0, 10.0, 0.0];
    phase.feature_size = record(DistributionType::LogNormal, 1, 1.0);
    for slot in [
        DistributionSlot::BOverA,
        DistributionSlot::COverA,
        DistributionSlot::Neighbors,
        DistributionSlot::Omega3,
    ] {
        *phase.distribution_mut(slot) = record(family, 6, 2.0);
    }
    phase
}

#[test]
fn distribution_families_roundtrip() {
    let tmp = TempFile::new("families");
    let mut stats = StatsDataArray::new("Statistics", 4);
    stats.set(1, phase(PhaseType::Primary, DistributionType::Beta));
    stats.set(2, phase(PhaseType::Precipitate, DistributionType::LogNormal));
    stats.set(3, phase(PhaseType::Transformation, DistributionType::Power));
    if let Some(p) = stats.get_mut(2) {
        p.precipitate_boundary_fraction = Some(0.3);
        p.parent_phase = 1;
    }
    if let Some(p) = stats.get_mut(3) {
        p.mdf_weights = Some(
            WeightTable::from_values(
                WeightKind::Mdf,
                vec![vec![30.0, 45.0], vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0.5, 0.5]],
            )
            .unwrap(),
        );
        p.misorientation_bins = Some(DataArray::from_column("MisorientationBins", vec![0.1; 16]));
    }

    let mut ensemble = AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 4);
    ensemble.add_array("Statistics", stats.clone());
    let mut dc = DataContainer::new("dc");
    dc.add_matrix(ensemble);

    let back = round_trip(&tmp, &[dc], &ReadOptions::default());
    let read = back[0]
        .matrix("ENSEMBLE_DATA")
        .unwrap()
        .get_array("Statistics")
        .and_then(AttributeArray::as_statistics)
        .unwrap();
    assert_eq!(read.num_tuples(), 4);
    assert!(read.get(0).is_none());

    for index in 1..4 {
        let mut expected = stats.get(index).unwrap().clone();
        expected.ensure_bin_numbers().unwrap();
        let actual = read.get(index).unwrap();
        assert_eq!(actual, &expected, "phase {index}");
        for slot in DistributionSlot::ALL {
            let (a, e) = (actual.distribution(slot), expected.distribution(slot));
            assert_eq!(a.family(), e.family());
            for column in e.columns() {
                assert_eq!(a.column(column.name()), Some(column));
            }
        }
    }
}

#[test]
fn empty_distribution_column_aborts_write() {
    let mut bad = phase(PhaseType::Primary, DistributionType::Beta);
    bad.neighbors = DistributionRecord::new(DistributionType::Beta);
    let mut stats = StatsDataArray::new("Statistics", 2);
    stats.set(1, bad);
    let mut ensemble = AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 2);
    ensemble.add_array("Statistics", stats);

    let mut group = Group::new();
    assert!(matches!(
        ensemble.write_all_to(&mut group),
        Err(StoreError::EmptyDistributionColumn { .. })
    ));
}

#[test]
fn corrupt_statistics_tuple_count_is_an_error() {
    let mut stats = StatsDataArray::new("Statistics", 3);
    stats.set(1, phase(PhaseType::Primary, DistributionType::Beta));
    stats.set(2, phase(PhaseType::Matrix, DistributionType::LogNormal));
    let mut ensemble = AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 3);
    ensemble.add_array("Statistics", stats);

    let mut group = Group::new();
    ensemble.write_all_to(&mut group).unwrap();
    let statistics = group.open_group_mut("Statistics").unwrap();
    statistics.set_attribute(TUPLE_COUNT, 1i64).unwrap();

    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 0);
    assert!(matches!(
        back.read_all_from(&group, None, false),
        Err(StoreError::PhaseIndexOutOfRange { .. })
    ));

    group
        .open_group_mut("Statistics")
        .unwrap()
        .set_attribute(TUPLE_COUNT, i64::MAX)
        .unwrap();
    let mut back = AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 0);
    back.read_all_from(&group, None, false).unwrap();
    let read = back
        .get_array("Statistics")
        .and_then(AttributeArray::as_statistics)
        .unwrap();
    assert_eq!(read.iter().map(|(i, _)| i).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn distribution_columns_must_agree() {
    let err = DistributionRecord::from_values(
        DistributionType::Beta,
        vec![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]],
    )
    .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DistributionShape { expected: 3, actual: 2, .. }
    ));
}

#[test]
fn weight_table_columns_are_co_indexed() {
    let err = WeightTable::from_values(
        WeightKind::Odf,
        vec![vec![0.0; 3], vec![0.0; 3], vec![0.0; 3], vec![1.0; 2], vec![1.0; 3]],
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::WeightTableShape { .. }));
}

#[test]
fn bin_generation_is_deterministic() {
    let bins = generate_bin_numbers([2.0, 10.0, 0.0]).unwrap();
    assert_eq!(bins.as_slice(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

    let bins = generate_bin_numbers([3.0, 10.0, 1.0]).unwrap();
    assert_eq!(bins.as_slice(), &[1.0, 4.0, 7.0, 10.0]);

    assert!(matches!(
        generate_bin_numbers([0.0, 10.0, 1.0]),
        Err(StoreError::InvalidBinStep(_))
    ));
    assert!(matches!(
        generate_bin_numbers([-1.0, 10.0, 1.0]),
        Err(StoreError::InvalidBinStep(_))
    ));
    assert!(generate_bin_numbers([1.0, 0.0, 5.0]).unwrap().is_empty());
    assert!(matches!(
        generate_bin_numbers([1e-9, 1e3, 0.0]),
        Err(StoreError::TooManyBins { .. })
    ));
}

// =============================================================================
// Container files
// =============================================================================

#[test]
fn file_version_stamped_once() {
    let tmp = TempFile::new("version");
    {
        let file = ContainerFile::create(&tmp.0).unwrap();
        assert_eq!(file.file_version(), Some(FILE_VERSION));
    }
    {
        let mut file = ContainerFile::open(&tmp.0).unwrap();
        file.root_mut().unwrap().create_group("Extra").unwrap();
    }
    let file = ContainerFile::open_read_only(&tmp.0).unwrap();
    assert_eq!(file.file_version(), Some("7.0"));
    assert!(file.root().is_group("Extra"));
    assert_eq!(file.root().attributes.len(), 1);
}

#[test]
fn file_without_version_opens() {
    let tmp = TempFile::new("no-version");
    let mut root = Group::new();
    root.create_group("DataContainers").unwrap();
    std::fs::write(&tmp.0, writer::to_bytes(&root).unwrap()).unwrap();

    let file = ContainerFile::open_read_only(&tmp.0).unwrap();
    assert_eq!(file.file_version(), None);
    assert!(read_data_containers(&file, &ReadOptions::default()).unwrap().is_empty());
}

#[test]
fn read_only_refuses_writes() {
    let tmp = TempFile::new("read-only");
    ContainerFile::create(&tmp.0).unwrap().close().unwrap();
    let mut file = ContainerFile::open_read_only(&tmp.0).unwrap();
    assert!(matches!(
        write_data_containers(&mut file, &[DataContainer::new("dc")]),
        Err(StoreError::ReadOnly)
    ));
}

#[test]
fn geometry_and_matrices_roundtrip() {
    let tmp = TempFile::new("geometry");
    let mut dc = DataContainer::new("VolumeDataContainer");
    dc.geometry = Some(ImageGeometry {
        dimensions: [3, 2, 1],
        origin: [1.0, 2.0, 3.0],
        spacing: [0.25, 0.25, 0.5],
    });
    let mut cells = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 6);
    cells.add_array("FeatureIds", DataArray::from_column("FeatureIds", vec![0i32, 1, 1, 2, 2, 2]));
    dc.add_matrix(cells);
    dc.add_matrix(AttributeMatrix::with_default_name(AttributeMatrixType::Ensemble, 3));

    let back = round_trip(&tmp, &[dc.clone()], &ReadOptions::default());
    assert_eq!(back, vec![dc]);
    assert_eq!(back[0].matrix("ENSEMBLE_DATA").unwrap().matrix_type(), AttributeMatrixType::Ensemble);
}

#[test]
fn arrays_carry_both_kind_tags() {
    let mut m = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 2);
    m.add_array("Mask", DataArray::<bool>::new("Mask", 2, 1));
    let mut group = Group::new();
    m.write_all_to(&mut group).unwrap();

    assert_eq!(group.read_string_attribute("Mask", OBJECT_TYPE).unwrap(), "DataArray<bool>");
    assert!(group.read_int_attribute("Mask", OBJECT_KIND).is_ok());
}

// =============================================================================
// Format verification
// =============================================================================

#[test]
fn verify_header_format() {
    let bytes = writer::to_bytes(&Group::new()).unwrap();
    assert!(bytes.len() > HEADER_SIZE);
    assert_eq!(&bytes[0..8], MAGIC);
    assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), VERSION);
    assert_eq!(u32::from_le_bytes(bytes[12..16].try_into().unwrap()), 0);
    assert_eq!(parse(&bytes).unwrap(), Group::new());
}

#[test]
fn rejects_corrupt_files() {
    let tmp = TempFile::new("corrupt");
    std::fs::write(&tmp.0, b"TVAULT\0\0garbage").unwrap();
    assert!(ContainerFile::open(&tmp.0).is_err());

    let mut bytes = writer::to_bytes(&Group::new()).unwrap();
    bytes[0] = b'X';
    assert!(matches!(parse(&bytes), Err(StoreError::InvalidMagic)));

    let mut root = Group::new();
    root.write_slice("x", vec![4], &[1.0f64, 2.0, 3.0, 4.0]).unwrap();
    let bytes = writer::to_bytes(&root).unwrap();
    for len in [HEADER_SIZE, bytes.len() / 2, bytes.len() - 1] {
        assert!(parse(&bytes[..len]).is_err(), "prefix of {len} bytes");
    }
}
