//! Content checksums for link files using SHA-256
//!
//! Checksums are persisted inside link files and compared on every resolve,
//! so they must stay stable across releases: lowercase hex of a SHA-256 digest.

use sha2::{Digest, Sha256};
use std::io::{self, Read};
use std::path::Path;

/// Length of a hex-encoded checksum
pub const CHECKSUM_HEX_LEN: usize = 64;

/// Compute the checksum of a byte slice
pub fn checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Compute the checksum of everything a reader yields
///
/// Fails only if reading fails; hashing itself is total.
pub fn checksum_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Compute the checksum of a file on disk
pub fn checksum_file(path: &Path) -> io::Result<String> {
    let file = std::fs::File::open(path)?;
    checksum_reader(io::BufReader::new(file))
}
