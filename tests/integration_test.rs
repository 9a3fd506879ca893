//! Tests against real NetCDF files written into a temporary directory.

mod common;

use common::{classic_file, concentration_at, sample_file};
use ncinfo::{
    data_model::{inquire_data_model, DataModel},
    errors::{NcInfoError, Result},
    info::{info_document, UNLIMITED},
    metadata::read_metadata,
    report::{write_report, SECTIONS},
    slab::{read_slab, validate_dimension_index, SlabQuery},
};
use netcdf::open;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_data_model_of_netcdf4_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());

    assert_eq!(inquire_data_model(&path)?, DataModel::Netcdf4);
    Ok(())
}

#[test]
fn test_classic_file() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = classic_file(temp_dir.path());

    assert_eq!(inquire_data_model(&path)?, DataModel::Netcdf3_64BitOffset);

    let metadata = read_metadata(&path)?;
    assert_eq!(metadata.data_model, DataModel::Netcdf3_64BitOffset);
    assert!(metadata.groups.is_empty());

    let mut buffer = Vec::new();
    write_report(&metadata, &mut buffer)?;
    let report = String::from_utf8(buffer).expect("report is UTF-8");
    assert!(report.contains("\n\nData Model\n\nNETCDF3_64BIT_OFFSET\n"));
    assert!(report.contains("\n\nGroups\n\n{}\n"));

    let doc = info_document(&metadata);
    assert_eq!(doc["data_model"], json!("NETCDF3_64BIT_OFFSET"));
    assert!(doc.get("groups").is_none());
    assert_eq!(
        doc["attributes"]["history"],
        json!("line one\\n\",\"line two")
    );

    let file = open(&path)?;
    let slab = read_slab(&file, &SlabQuery::new("level", vec![]))?;
    assert_eq!(slab.to_json()["values"], json!([1.0, 2.0, 3.0]));
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("does_not_exist.nc");

    match read_metadata(&path) {
        Err(NcInfoError::NetCDFError(_)) => {}
        other => panic!("Expected NetCDFError, got {:?}", other.map(|m| m.path)),
    }
    assert!(inquire_data_model(&path).is_err());
}

#[test]
fn test_read_metadata_snapshot() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());

    let metadata = read_metadata(&path)?;
    assert_eq!(metadata.data_model, DataModel::Netcdf4);
    assert_eq!(metadata.path, path);

    let time = metadata.dimension("time").expect("time dimension");
    assert_eq!(time.length, 2);
    assert!(!time.is_unlimited);
    assert!(metadata.dimension("record").expect("record").is_unlimited);

    let conc = metadata.variable("concentration").expect("concentration");
    assert_eq!(conc.dimensions, vec!["time", "z", "y", "x"]);
    assert_eq!(conc.shape, vec![2, 3, 2, 2]);
    assert_eq!(conc.data_type, "float");
    assert!(conc.attribute("units").is_some());
    assert!(!conc.is_scalar());

    let origin = metadata.variable("origin").expect("origin");
    assert!(origin.is_scalar());
    assert!(origin.shape.is_empty());

    assert_eq!(metadata.attribute_names(), vec!["title", "history"]);

    assert_eq!(metadata.groups.len(), 1);
    let group = &metadata.groups[0];
    assert_eq!(group.name, "source");
    assert_eq!(group.path, "/source");
    assert_eq!(group.attributes.len(), 1);
    assert!(group.groups.is_empty());

    Ok(())
}

#[test]
fn test_report_sections_in_order() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let metadata = read_metadata(&path)?;

    let mut buffer = Vec::new();
    write_report(&metadata, &mut buffer)?;
    let report = String::from_utf8(buffer).expect("report is UTF-8");

    let positions: Vec<usize> = SECTIONS
        .iter()
        .map(|title| {
            report
                .find(&format!("\n\n{}\n", title))
                .unwrap_or_else(|| panic!("missing section {}", title))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    // every section has content before the next heading
    for (i, &start) in positions.iter().enumerate() {
        let end = positions.get(i + 1).copied().unwrap_or(report.len());
        let body = report[start..end]
            .trim_start_matches('\n')
            .trim_start_matches(SECTIONS[i])
            .trim();
        assert!(!body.is_empty(), "section {} is empty", SECTIONS[i]);
    }

    assert!(report.contains("\n\nData Model\n\nNETCDF4\n"));
    assert!(report.contains("'source': group /source"));
    assert!(report.contains("'time': name = 'time', size = 2"));
    assert!(report.contains("'record': (unlimited) name = 'record', size = 0"));
    assert!(report.contains("float concentration(time, z, y, x)"));
    assert!(report.contains("    units: 'ppm'"));
    assert!(report.contains("current shape = (2, 3, 2, 2)"));
    assert!(report.contains("float origin()"));
    assert!(report.contains("current shape = ()"));
    assert!(report.contains("'title': 'Test Dataset'"));
    assert!(report.contains("'history': 'line one\\nline two'"));
    assert!(report.contains("    _FillValue: -999.0"));
    assert!(report.contains("    valid_range: [0.0, 5000.0]"));

    Ok(())
}

#[test]
fn test_info_document() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let doc = info_document(&read_metadata(&path)?);

    let top: Vec<&str> = doc
        .as_object()
        .expect("object")
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(
        top,
        vec!["data_model", "dimensions", "variables", "attributes", "groups"]
    );

    assert_eq!(doc["data_model"], json!("NETCDF4"));

    let dims: Vec<&str> = doc["dimensions"]
        .as_object()
        .expect("dimensions object")
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(dims, vec!["record", "time", "x", "y", "z"]);
    assert_eq!(doc["dimensions"]["time"], json!(2));
    assert_eq!(doc["dimensions"]["record"], json!(UNLIMITED));

    let conc = &doc["variables"]["concentration"];
    assert_eq!(conc["dimensions"], json!(["time", "z", "y", "x"]));
    assert_eq!(conc["attributes"]["units"], json!("ppm"));
    assert_eq!(conc["attributes"]["_FillValue"], json!(-999.0));
    assert_eq!(conc["attributes"]["valid_range"], json!([0.0, 5000.0]));
    assert_eq!(doc["variables"]["origin"]["dimensions"], json!([]));

    assert_eq!(doc["attributes"]["title"], json!("Test Dataset"));
    assert_eq!(doc["attributes"]["history"], json!("line one\\nline two"));

    let source = &doc["groups"]["source"];
    assert_eq!(source["attributes"]["site"], json!("stack 1"));
    assert!(source.get("groups").is_none());
    assert!(source.get("data_model").is_none());

    Ok(())
}

#[test]
fn test_read_slab_plane() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let file = open(&path)?;

    let query = SlabQuery::new(
        "concentration",
        vec![("time".to_string(), 1), ("z".to_string(), 2)],
    );
    let slab = read_slab(&file, &query)?;

    assert_eq!(slab.dimensions, vec!["y", "x"]);
    assert_eq!(slab.shape, vec![2, 2]);
    assert_eq!(slab.values.shape(), &[2, 2]);
    assert_eq!(slab.values[[0, 0]], concentration_at(1, 2, 0, 0) as f64);
    assert_eq!(slab.values[[1, 1]], concentration_at(1, 2, 1, 1) as f64);
    assert_eq!(slab.fill_value, Some(-999.0));
    assert_eq!(slab.valid_count(), 4);

    let doc = slab.to_json();
    assert_eq!(doc["variable"], json!("concentration"));
    assert_eq!(doc["indices"], json!({"time": 1, "z": 2}));
    assert_eq!(doc["shape"], json!([2, 2]));
    assert_eq!(doc["values"], json!([[1200.0, 1201.0], [1210.0, 1211.0]]));

    Ok(())
}

#[test]
fn test_read_slab_masks_fill_values() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let file = open(&path)?;

    let query = SlabQuery::new(
        "concentration",
        vec![("z".to_string(), 0), ("time".to_string(), 0)],
    );
    let slab = read_slab(&file, &query)?;

    assert_eq!(slab.valid_count(), 3);
    assert_eq!(slab.to_json()["values"], json!([[null, 1.0], [10.0, 11.0]]));
    Ok(())
}

#[test]
fn test_read_slab_whole_variables() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let file = open(&path)?;

    let scalar = read_slab(&file, &SlabQuery::new("origin", vec![]))?;
    assert!(scalar.shape.is_empty());
    assert_eq!(scalar.to_json()["values"], json!(42.0));

    let whole = read_slab(&file, &SlabQuery::new("concentration", vec![]))?;
    assert_eq!(whole.shape, vec![2, 3, 2, 2]);
    assert_eq!(whole.values.len(), 24);
    Ok(())
}

#[test]
fn test_slab_errors() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = sample_file(temp_dir.path());
    let file = open(&path)?;

    assert!(validate_dimension_index(&file, "time", 1).is_ok());
    match validate_dimension_index(&file, "time", 2) {
        Err(NcInfoError::IndexOutOfRange { dim, index, length }) => {
            assert_eq!((dim.as_str(), index, length), ("time", 2, 2));
        }
        other => panic!("Expected IndexOutOfRange, got {:?}", other),
    }
    assert!(matches!(
        validate_dimension_index(&file, "depth", 0),
        Err(NcInfoError::DimensionNotFound { .. })
    ));

    let missing_var = read_slab(&file, &SlabQuery::new("pressure", vec![]));
    assert!(matches!(
        missing_var,
        Err(NcInfoError::VariableNotFound { .. })
    ));

    // `record` exists in the file but not on the variable
    let foreign_dim = read_slab(
        &file,
        &SlabQuery::new("concentration", vec![("record".to_string(), 0)]),
    );
    assert!(matches!(
        foreign_dim,
        Err(NcInfoError::DimensionNotFound { .. })
    ));

    let repeated = read_slab(
        &file,
        &SlabQuery::new(
            "concentration",
            vec![("time".to_string(), 0), ("time".to_string(), 1)],
        ),
    );
    assert!(matches!(repeated, Err(NcInfoError::InvalidArgument { .. })));

    Ok(())
}
