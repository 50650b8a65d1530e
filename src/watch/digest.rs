// src/watch/digest.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Recorded in place of a digest for directories.
///
/// Digesting directory contents is not supported: a directory always carries
/// this fixed value, so two observations of the same directory compare
/// digest-equal and directory changes are only ever detected via metadata.
pub const DIRECTORY_DIGEST: [u8; 16] = [0xff; 16];

/// Compute the MD5 digest of the full content at `path`.
///
/// The path is opened literally (no shell involved), so names starting with
/// whitespace or `-` are read verbatim.
pub fn digest_file(path: &Path) -> Result<[u8; 16]> {
    let meta = fs::metadata(path).with_context(|| format!("stat {:?} for digest", path))?;
    if meta.is_dir() {
        debug!(path = %path.display(), "directory content is not digested");
        return Ok(DIRECTORY_DIGEST);
    }

    let content = fs::read(path).with_context(|| format!("reading {:?} for digest", path))?;
    Ok(md5::compute(&content).0)
}
