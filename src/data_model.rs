//! NetCDF data model (on-disk format variant) detection
//!
//! The `netcdf` crate does not expose the format of an open file, so the
//! inquiry goes straight to libnetcdf through `netcdf-sys` on a short-lived,
//! read-only handle of its own.

use crate::errors::{NcInfoError, Result};
use netcdf_sys::{
    nc_close, nc_inq_format, nc_open, nc_strerror, NC_FORMAT_64BIT_DATA,
    NC_FORMAT_64BIT_OFFSET, NC_FORMAT_CLASSIC, NC_FORMAT_NETCDF4, NC_FORMAT_NETCDF4_CLASSIC,
    NC_NOERR, NC_NOWRITE,
};
use std::ffi::{CStr, CString};
use std::fmt;
use std::os::raw::c_int;
use std::path::Path;

/// Format variant of a NetCDF file, named the way netCDF4-python names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataModel {
    Netcdf3Classic,
    Netcdf3_64BitOffset,
    Netcdf3_64BitData,
    Netcdf4,
    Netcdf4Classic,
    /// A format code this build does not recognise
    Unknown(i32),
}

impl DataModel {
    /// Map a libnetcdf `NC_FORMAT_*` code.
    pub fn from_format_code(code: i32) -> Self {
        match code {
            NC_FORMAT_CLASSIC => DataModel::Netcdf3Classic,
            NC_FORMAT_64BIT_OFFSET => DataModel::Netcdf3_64BitOffset,
            NC_FORMAT_NETCDF4 => DataModel::Netcdf4,
            NC_FORMAT_NETCDF4_CLASSIC => DataModel::Netcdf4Classic,
            NC_FORMAT_64BIT_DATA => DataModel::Netcdf3_64BitData,
            other => DataModel::Unknown(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataModel::Netcdf3Classic => "NETCDF3_CLASSIC",
            DataModel::Netcdf3_64BitOffset => "NETCDF3_64BIT_OFFSET",
            DataModel::Netcdf3_64BitData => "NETCDF3_64BIT_DATA",
            DataModel::Netcdf4 => "NETCDF4",
            DataModel::Netcdf4Classic => "NETCDF4_CLASSIC",
            DataModel::Unknown(_) => "UNKNOWN",
        }
    }

    /// True for files stored in HDF5 (both NETCDF4 variants).
    pub fn is_netcdf4(&self) -> bool {
        matches!(self, DataModel::Netcdf4 | DataModel::Netcdf4Classic)
    }
}

impl fmt::Display for DataModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataModel::Unknown(code) => write!(f, "UNKNOWN({})", code),
            known => f.write_str(known.as_str()),
        }
    }
}

/// Ask libnetcdf which format the file at `path` is stored in.
pub fn inquire_data_model(path: &Path) -> Result<DataModel> {
    let c_path = path
        .to_str()
        .and_then(|p| CString::new(p).ok())
        .ok_or_else(|| {
            NcInfoError::Generic(format!(
                "Path is not valid UTF-8 or contains NUL: {}",
                path.display()
            ))
        })?;

    let _guard = netcdf_sys::libnetcdf_lock.lock();

    let mut ncid: c_int = 0;
    // SAFETY: `c_path` is a valid NUL-terminated string that outlives the
    // call and `ncid` is a valid out-pointer. The global lock is held.
    let status = unsafe { nc_open(c_path.as_ptr(), NC_NOWRITE, &mut ncid) };
    check(path, status)?;

    let mut format: c_int = 0;
    // SAFETY: `ncid` was returned by a successful `nc_open` above.
    let status = unsafe { nc_inq_format(ncid, &mut format) };
    // SAFETY: closed exactly once regardless of the inquiry result.
    let close_status = unsafe { nc_close(ncid) };

    check(path, status)?;
    check(path, close_status)?;

    let model = DataModel::from_format_code(format);
    tracing::debug!(path = %path.display(), format, %model, "inquired data model");
    Ok(model)
}

fn check(path: &Path, status: c_int) -> Result<()> {
    if status == NC_NOERR {
        return Ok(());
    }
    // SAFETY: nc_strerror returns a pointer to a static NUL-terminated string.
    let message = unsafe { CStr::from_ptr(nc_strerror(status)) }
        .to_string_lossy()
        .into_owned();
    Err(NcInfoError::FormatInquiry {
        path: path.to_path_buf(),
        code: status,
        message,
    })
}
