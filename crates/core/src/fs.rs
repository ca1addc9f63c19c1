//! Filesystem checks

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

/// Every SQLite 3 database file starts with this header.
const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// Check if a path is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Check that a path is a SQLite database by reading its header
pub fn is_sqlite_file(path: &str) -> bool {
    if !is_file(path) {
        return false;
    }

    let mut header = [0u8; 16];
    match File::open(path).and_then(|mut f| f.read_exact(&mut header)) {
        Ok(()) => &header == SQLITE_HEADER,
        Err(e) => {
            debug!("could not read header of {}: {}", path, e);
            false
        }
    }
}
