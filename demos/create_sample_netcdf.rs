//! Creates a sample `concentration.timeseries.nc` for trying out ncinfo.
//!
//! The file has an unlimited `time` dimension, a 4-D `concentration`
//! variable with a `_FillValue`, coordinate variables, global attributes and
//! one subgroup, so every section of the report has something to show.

use ndarray::{Array1, Array4};
use netcdf::create;
use std::path::Path;

const NT: usize = 4;
const NZ: usize = 3;
const NY: usize = 5;
const NX: usize = 6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new("concentration.timeseries.nc");

    println!("Creating sample NetCDF file: {}", output_path.display());

    if output_path.exists() {
        std::fs::remove_file(output_path)?
    }

    let mut file = create(output_path)?;

    file.add_attribute("title", "Sample tracer concentration time series")?;
    file.add_attribute("institution", "ncinfo sample data")?;
    file.add_attribute("Conventions", "CF-1.8")?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("z", NZ)?;
    file.add_dimension("y", NY)?;
    file.add_dimension("x", NX)?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "hours since 2024-01-01 00:00:00")?;
        time_var.put_attribute("calendar", "standard")?;
        let times = Array1::from_iter((0..NT).map(|i| i as f64 * 6.0));
        time_var.put(times.view(), 0..NT)?;
    }

    {
        let mut z_var = file.add_variable::<f32>("z", &["z"])?;
        z_var.put_attribute("units", "m")?;
        z_var.put_attribute("positive", "up")?;
        let levels = Array1::from(vec![10.0f32, 100.0, 500.0]);
        z_var.put(levels.view(), ..)?;
    }

    {
        let mut var = file.add_variable::<f32>("concentration", &["time", "z", "y", "x"])?;
        var.put_attribute("units", "ppm")?;
        var.put_attribute("long_name", "tracer concentration")?;
        var.put_attribute("_FillValue", -9999.0f32)?;

        let data = Array4::from_shape_fn((NT, NZ, NY, NX), |(t, z, y, x)| {
            if y == 0 && x == 0 {
                -9999.0
            } else {
                (t * 1000 + z * 100 + y * 10 + x) as f32 / 10.0
            }
        });
        var.put(data.view(), (0..NT, 0..NZ, 0..NY, 0..NX))?;
    }

    {
        let mut group = file.add_group("source")?;
        group.add_attribute("site", "stack 1")?;
    }

    println!("Created sample file with:");
    println!("   Dimensions: time(unlimited, {}), z({}), y({}), x({})", NT, NZ, NY, NX);
    println!("   Variables: time, z, concentration");
    println!("   Groups: source");
    println!("\nTry it with:");
    println!("   cargo run -- -f {}", output_path.display());
    println!("   cargo run -- -f {} --slab time=1,z=0", output_path.display());

    Ok(())
}
