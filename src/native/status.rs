//! Native status codes
//!
//! The native layer reports failures as negated `errno` values. Only the codes
//! this crate interprets, or that show up routinely from `librados`, are named.

pub use libc::{
    EACCES, EBADF, EEXIST, EINVAL, EIO, EISCONN, ENOENT, ENOTCONN, ERANGE, ETIMEDOUT,
};

/// Symbolic name of a (possibly negated) errno value
pub fn errno_name(status: i32) -> Option<&'static str> {
    let name = match status.checked_abs()? {
        ENOENT => "ENOENT",
        EIO => "EIO",
        EBADF => "EBADF",
        EACCES => "EACCES",
        EEXIST => "EEXIST",
        EINVAL => "EINVAL",
        ERANGE => "ERANGE",
        EISCONN => "EISCONN",
        ENOTCONN => "ENOTCONN",
        ETIMEDOUT => "ETIMEDOUT",
        _ => return None,
    };
    Some(name)
}

/// Render a status for error messages, e.g. `status -2 (ENOENT)`
pub fn describe(status: &i32) -> String {
    match errno_name(*status) {
        Some(name) if *status < 0 => format!("status {} ({})", status, name),
        _ => format!("status {}", status),
    }
}

/// Convert an `std::io::Error` into a negated errno status
pub fn from_io_error(err: &std::io::Error) -> i32 {
    match err.raw_os_error() {
        Some(code) if code > 0 => -code,
        _ => match err.kind() {
            std::io::ErrorKind::NotFound => -ENOENT,
            std::io::ErrorKind::PermissionDenied => -EACCES,
            std::io::ErrorKind::InvalidInput | std::io::ErrorKind::InvalidData => -EINVAL,
            _ => -EIO,
        },
    }
}
