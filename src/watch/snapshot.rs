// src/watch/snapshot.rs

use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::watch::digest::digest_file;

/// Metadata captured for one data stream (primary content or resource fork).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamMeta {
    pub inode: u64,
    pub mode: u32,
    pub links: u64,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    /// Unix timestamps, second resolution.
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
    /// Present only when digest tracking is enabled.
    pub digest: Option<[u8; 16]>,
}

impl StreamMeta {
    fn from_metadata(meta: &fs::Metadata) -> Self {
        Self {
            inode: meta.ino(),
            mode: meta.mode(),
            links: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            atime: meta.atime(),
            mtime: meta.mtime(),
            ctime: meta.ctime(),
            digest: None,
        }
    }
}

/// One observation of a watched path.
///
/// Replaced wholesale every cycle, never mutated in place. A missing path is
/// `Absent`; "exists but metadata missing" is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    Absent,
    Present {
        primary: StreamMeta,
        /// Present iff resource-fork tracking is enabled.
        secondary: Option<StreamMeta>,
    },
}

impl Snapshot {
    pub fn exists(&self) -> bool {
        matches!(self, Snapshot::Present { .. })
    }
}

/// What the snapshot builder should capture beyond plain metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotOptions {
    pub digest: bool,
    pub rsrc: bool,
}

/// Resource fork addressing used when `--rsrc` is enabled.
///
/// The fork of an existing file is always statable on the supported
/// platform; a file without a fork shows up as a zero-size stream.
pub fn resource_fork_path(path: &Path) -> PathBuf {
    path.join("..namedfork/rsrc")
}

/// Observe the current state of `path`.
///
/// A missing path is a normal result (`Snapshot::Absent`), not an error.
/// Any stat or read failure other than "not found" is propagated and aborts
/// the process.
pub fn build_snapshot(path: &Path, options: SnapshotOptions) -> Result<Snapshot> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "path does not exist");
            return Ok(Snapshot::Absent);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("stat {:?}", path));
        }
    };

    let mut primary = StreamMeta::from_metadata(&meta);
    if options.digest {
        primary.digest = Some(digest_file(path)?);
    }

    let secondary = if options.rsrc {
        let fork = resource_fork_path(path);
        let fork_meta =
            fs::metadata(&fork).with_context(|| format!("stat resource fork {:?}", fork))?;

        let mut fork_stream = StreamMeta::from_metadata(&fork_meta);
        if options.digest {
            fork_stream.digest = Some(digest_file(&fork)?);
        }
        Some(fork_stream)
    } else {
        None
    };

    Ok(Snapshot::Present { primary, secondary })
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::watch::digest::DIRECTORY_DIGEST;

    type TestResult = Result<(), Box<dyn Error>>;

    #[test]
    fn missing_path_snapshots_absent() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("nope.txt");

        let snap = build_snapshot(&path, SnapshotOptions::default())?;
        assert_eq!(snap, Snapshot::Absent);
        assert!(!snap.exists());
        Ok(())
    }

    #[test]
    fn present_file_captures_metadata() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello")?;

        let snap = build_snapshot(&path, SnapshotOptions::default())?;
        let Snapshot::Present { primary, secondary } = snap else {
            panic!("expected a present snapshot");
        };

        assert_eq!(primary.size, 5);
        assert!(primary.inode > 0);
        assert!(primary.links >= 1);
        assert_eq!(primary.digest, None);
        assert_eq!(secondary, None);
        Ok(())
    }

    #[test]
    fn digest_is_captured_when_enabled() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello")?;

        let options = SnapshotOptions { digest: true, rsrc: false };
        let snap = build_snapshot(&path, options)?;
        let Snapshot::Present { primary, .. } = snap else {
            panic!("expected a present snapshot");
        };

        assert_eq!(primary.digest, Some(md5::compute("hello").0));
        Ok(())
    }

    #[test]
    fn directory_snapshot_records_the_sentinel_digest() -> TestResult {
        let dir = tempdir()?;

        let options = SnapshotOptions { digest: true, rsrc: false };
        let snap = build_snapshot(dir.path(), options)?;
        let Snapshot::Present { primary, .. } = snap else {
            panic!("expected a present snapshot");
        };

        assert_eq!(primary.digest, Some(DIRECTORY_DIGEST));
        Ok(())
    }
}
