// src/hash.rs

//! SHA-256 checksums for downloaded archives
//!
//! Checksums are written as `sha256:<hex>`, the same form used in the
//! recipe configuration file.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Buffer size for streaming file hashes (64 KB)
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Hex-encoded SHA-256 of a byte slice
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Hex-encoded SHA-256 of a reader's remaining content
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hex-encoded SHA-256 of a file
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)
        .map_err(|e| Error::IoError(format!("Failed to open {}: {}", path.display(), e)))?;
    sha256_reader(file)
        .map_err(|e| Error::IoError(format!("Failed to hash {}: {}", path.display(), e)))
}

/// Split an `algorithm:hash` checksum, accepting only SHA-256
pub fn parse_checksum(checksum: &str) -> Result<&str> {
    let (algorithm, hash) = checksum
        .split_once(':')
        .ok_or_else(|| Error::ParseError(format!("Invalid checksum format: {}", checksum)))?;

    if algorithm != "sha256" {
        return Err(Error::ParseError(format!(
            "Unsupported checksum algorithm: {} (supported: sha256)",
            algorithm
        )));
    }
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ParseError(format!("Invalid sha256 digest: {}", hash)));
    }
    Ok(hash)
}

/// Check a file against an expected `sha256:<hex>` checksum
pub fn verify_file(path: &Path, expected: &str) -> Result<()> {
    let expected_hash = parse_checksum(expected)?;
    let actual = sha256_file(path)?;
    if !actual.eq_ignore_ascii_case(expected_hash) {
        return Err(Error::ChecksumMismatch {
            expected: expected.to_string(),
            actual: format!("sha256:{}", actual),
        });
    }
    Ok(())
}
