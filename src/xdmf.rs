//! XDMF companion documents
//!
//! Describes the cell arrays of image-geometry containers so that
//! visualization tools can map them onto a rectilinear grid. The document
//! only references data inside the container file; it is never read back.

use crate::data::{AttributeArray, AttributeMatrixType, DataContainer, ImageGeometry};
use crate::error::Result;
use crate::persist::container_io::DATA_CONTAINERS;
use std::io::Write;

/// Write an XDMF document for `containers`, referencing `hdf_file_name`.
///
/// Containers without image geometry are left out. Arrays whose element
/// type has no XDMF precision are noted in a comment.
pub fn write_xdmf<W: Write>(out: &mut W, containers: &[DataContainer], hdf_file_name: &str) -> Result<()> {
    writeln!(out, "<?xml version=\"1.0\"?>")?;
    writeln!(out, "<!DOCTYPE Xdmf SYSTEM \"Xdmf.dtd\"[]>")?;
    writeln!(out, "<Xdmf xmlns:xi=\"http://www.w3.org/2003/XInclude\" Version=\"2.2\">")?;
    writeln!(out, " <Domain>")?;

    for container in containers {
        let Some(geometry) = &container.geometry else {
            log::debug!("'{}' has no image geometry, not described", container.name());
            continue;
        };
        write_grid_header(out, container.name(), geometry)?;
        for matrix in container
            .matrices()
            .filter(|m| m.matrix_type() == AttributeMatrixType::Cell)
        {
            let group_path = format!("/{DATA_CONTAINERS}/{}/{}", container.name(), matrix.name());
            for (name, array) in matrix.iter() {
                write_attribute(out, name, array, geometry, hdf_file_name, &group_path)?;
            }
        }
        writeln!(out, "  </Grid>")?;
    }

    writeln!(out, " </Domain>")?;
    writeln!(out, "</Xdmf>")?;
    Ok(())
}

fn write_grid_header<W: Write>(out: &mut W, name: &str, geometry: &ImageGeometry) -> Result<()> {
    let [x, y, z] = geometry.dimensions;
    let [ox, oy, oz] = geometry.origin;
    let [sx, sy, sz] = geometry.spacing;
    writeln!(out, "  <Grid Name=\"{}\" GridType=\"Uniform\">", escape(name))?;
    writeln!(
        out,
        "    <Topology TopologyType=\"3DCoRectMesh\" Dimensions=\"{} {} {}\"></Topology>",
        z + 1,
        y + 1,
        x + 1
    )?;
    writeln!(out, "    <Geometry Type=\"ORIGIN_DXDYDZ\">")?;
    writeln!(out, "      <!-- Origin -->")?;
    writeln!(out, "      <DataItem Format=\"XML\" Dimensions=\"3\">{oz} {oy} {ox}</DataItem>")?;
    writeln!(out, "      <!-- DxDyDz (Spacing/Resolution) -->")?;
    writeln!(out, "      <DataItem Format=\"XML\" Dimensions=\"3\">{sz} {sy} {sx}</DataItem>")?;
    writeln!(out, "    </Geometry>")?;
    Ok(())
}

fn write_attribute<W: Write>(
    out: &mut W,
    name: &str,
    array: &AttributeArray,
    geometry: &ImageGeometry,
    hdf_file_name: &str,
    group_path: &str,
) -> Result<()> {
    // strings, lists and statistics have no grid representation
    let Some(dtype) = array.dtype() else {
        return Ok(());
    };
    let Some((number_type, precision)) = dtype.xdmf_type_and_precision() else {
        writeln!(
            out,
            "    <!-- '{}' has element type {} which XDMF cannot describe -->",
            escape(name),
            dtype.type_name()
        )?;
        return Ok(());
    };

    let [x, y, z] = geometry.dimensions;
    let components = array.num_components();
    let (kind, dimensions) = if components == 1 {
        ("Scalar", format!("{z} {y} {x}"))
    } else {
        ("Vector", format!("{z} {y} {x} {components}"))
    };
    writeln!(
        out,
        "    <Attribute Name=\"{} (Cell)\" AttributeType=\"{kind}\" Center=\"Cell\">",
        escape(name)
    )?;
    writeln!(
        out,
        "      <DataItem Format=\"HDF\" Dimensions=\"{dimensions}\" NumberType=\"{number_type}\" Precision=\"{precision}\" >"
    )?;
    writeln!(out, "        {}:{group_path}/{}", escape(hdf_file_name), escape(name))?;
    writeln!(out, "      </DataItem>")?;
    writeln!(out, "    </Attribute>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AttributeMatrix, DataArray, StringDataArray};

    fn volume() -> DataContainer {
        let mut dc = DataContainer::new("VolumeDataContainer");
        dc.geometry = Some(ImageGeometry {
            dimensions: [4, 3, 2],
            ..ImageGeometry::default()
        });
        let mut cells = AttributeMatrix::with_default_name(AttributeMatrixType::Cell, 24);
        cells.add_array("FeatureIds", DataArray::<i32>::new("FeatureIds", 24, 1));
        cells.add_array("EulerAngles", DataArray::<f32>::new("EulerAngles", 24, 3));
        cells.add_array("Quality", DataArray::<u16>::new("Quality", 24, 1));
        cells.add_array("Labels", StringDataArray::new("Labels", 24));
        dc.add_matrix(cells);
        dc
    }

    fn render(containers: &[DataContainer]) -> String {
        let mut out = Vec::new();
        write_xdmf(&mut out, containers, "grains.tvault").unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cell_arrays_described() {
        let text = render(&[volume()]);
        assert!(text.contains("Dimensions=\"3 4 5\""));
        assert!(text.contains("<Attribute Name=\"FeatureIds (Cell)\" AttributeType=\"Scalar\""));
        assert!(text.contains("Dimensions=\"2 3 4 3\" NumberType=\"Float\" Precision=\"4\""));
        assert!(text.contains("grains.tvault:/DataContainers/VolumeDataContainer/CELL_DATA/EulerAngles"));
        assert!(text.contains("<!-- 'Quality' has element type uint16_t"));
        assert!(!text.contains("Labels"));
        assert!(text.trim_end().ends_with("</Xdmf>"));
    }

    #[test]
    fn containers_without_geometry_skipped() {
        let mut dc = volume();
        dc.geometry = None;
        let text = render(&[dc]);
        assert!(!text.contains("<Grid"));
    }
}
