//! Shared NetCDF fixtures for the integration tests.

#![allow(dead_code)]

use netcdf::create;
use ndarray::Array4;
use std::path::{Path, PathBuf};

pub const FILL: f32 = -999.0;

/// Value stored at `concentration[t, z, y, x]`; the very first cell is fill.
pub fn concentration_at(t: usize, z: usize, y: usize, x: usize) -> f32 {
    if (t, z, y, x) == (0, 0, 0, 0) {
        FILL
    } else {
        (t * 1000 + z * 100 + y * 10 + x) as f32
    }
}

/// Writes `sample.nc` into `dir`:
///
/// * dimensions `time(2) z(3) y(2) x(2)` plus an empty unlimited `record`
/// * `concentration(time, z, y, x)` float with units, `_FillValue`, `valid_range`
/// * scalar `origin`
/// * global `title` and a multi-line `history`
/// * subgroup `source`
pub fn sample_file(dir: &Path) -> PathBuf {
    let path = dir.join("sample.nc");
    let mut file = create(&path).expect("Failed to create NetCDF file");

    file.add_attribute("title", "Test Dataset")
        .expect("Failed to add title");
    file.add_attribute("history", "line one\nline two")
        .expect("Failed to add history");

    file.add_dimension("time", 2).expect("Failed to add time");
    file.add_dimension("z", 3).expect("Failed to add z");
    file.add_dimension("y", 2).expect("Failed to add y");
    file.add_dimension("x", 2).expect("Failed to add x");
    file.add_unlimited_dimension("record")
        .expect("Failed to add record");

    {
        let mut var = file
            .add_variable::<f32>("concentration", &["time", "z", "y", "x"])
            .expect("Failed to add concentration");
        var.put_attribute("units", "ppm").expect("units");
        var.put_attribute("_FillValue", FILL).expect("_FillValue");
        var.put_attribute("valid_range", vec![0.0f32, 5000.0])
            .expect("valid_range");

        let data = Array4::from_shape_fn((2, 3, 2, 2), |(t, z, y, x)| concentration_at(t, z, y, x));
        var.put(data.view(), ..).expect("Failed to write concentration");
    }

    {
        let mut scalar = file
            .add_variable::<f32>("origin", &[])
            .expect("Failed to add origin");
        scalar.put_attribute("units", "m").expect("units");
        let value = ndarray::arr0(42.0f32);
        scalar
            .put(value.view(), &[] as &[usize])
            .expect("Failed to write origin");
    }

    {
        let mut group = file.add_group("source").expect("Failed to add group");
        group.add_attribute("site", "stack 1").expect("site");
    }

    path
}

/// Writes `classic.nc` into `dir` in the NETCDF3 64-bit offset format:
///
/// * dimension `time(3)` and `level(time)` as float
/// * global `title` and a multi-line `history`
pub fn classic_file(dir: &Path) -> PathBuf {
    let path = dir.join("classic.nc");
    let mut file = netcdf::create_with(&path, netcdf::Options::_64BIT_OFFSET)
        .expect("Failed to create classic NetCDF file");

    file.add_attribute("title", "Classic Dataset")
        .expect("Failed to add title");
    file.add_attribute("history", "line one\nline two")
        .expect("Failed to add history");

    file.add_dimension("time", 3).expect("Failed to add time");
    {
        let mut var = file
            .add_variable::<f32>("level", &["time"])
            .expect("Failed to add level");
        let data = ndarray::arr1(&[1.0f32, 2.0, 3.0]);
        var.put(data.view(), ..).expect("Failed to write level");
    }

    path
}
