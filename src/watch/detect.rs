// src/watch/detect.rs

//! Snapshot diffing.
//!
//! [`detect_changes`] turns two observations of the same path into an
//! ordered list of [`ChangeKind`] tags. The tag order is fixed: existence
//! transitions first, then primary metadata fields, then the secondary
//! stream. Rendering the tags as text is the reporter's job; equality on
//! the tag sequence is what tests assert on.

use std::fmt;

use crate::watch::snapshot::{Snapshot, StreamMeta};

/// One reason a target counts as changed.
///
/// Variant order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Created,
    Deleted,
    Inode,
    Mode,
    LinkCount,
    OwnerUid,
    OwnerGid,
    Size,
    ContentDigest,
    AccessTime,
    ModifyTime,
    ChangeTime,
    SecondarySize,
    SecondaryDigest,
}

impl ChangeKind {
    pub fn as_tag(self) -> &'static str {
        match self {
            ChangeKind::Created => "created",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Inode => "inode",
            ChangeKind::Mode => "mode",
            ChangeKind::LinkCount => "link-count",
            ChangeKind::OwnerUid => "owner-uid",
            ChangeKind::OwnerGid => "owner-gid",
            ChangeKind::Size => "size",
            ChangeKind::ContentDigest => "content-digest",
            ChangeKind::AccessTime => "access-time",
            ChangeKind::ModifyTime => "modify-time",
            ChangeKind::ChangeTime => "change-time",
            ChangeKind::SecondarySize => "secondary-size",
            ChangeKind::SecondaryDigest => "secondary-digest",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// The result of diffing two snapshots of one target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeReport {
    kinds: Vec<ChangeKind>,
}

impl ChangeReport {
    pub fn is_changed(&self) -> bool {
        !self.kinds.is_empty()
    }

    pub fn kinds(&self) -> &[ChangeKind] {
        &self.kinds
    }

    fn push(&mut self, kind: ChangeKind) {
        self.kinds.push(kind);
    }
}

/// Which optional comparisons are active for this run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectOptions {
    pub digest: bool,
    pub atime: bool,
}

/// Diff `previous` against `current`.
///
/// `previous` is `None` only before the target's initial snapshot has been
/// recorded; that is never a change. Existence transitions report exactly
/// one tag and skip field comparison (one side has no metadata).
pub fn detect_changes(
    previous: Option<&Snapshot>,
    current: &Snapshot,
    options: DetectOptions,
) -> ChangeReport {
    let mut report = ChangeReport::default();

    let Some(previous) = previous else {
        return report;
    };

    match (previous, current) {
        (Snapshot::Absent, Snapshot::Absent) => {}
        (Snapshot::Absent, Snapshot::Present { .. }) => {
            report.push(ChangeKind::Created);
        }
        (Snapshot::Present { .. }, Snapshot::Absent) => {
            report.push(ChangeKind::Deleted);
        }
        (
            Snapshot::Present { primary: prev, secondary: prev_sec },
            Snapshot::Present { primary: curr, secondary: curr_sec },
        ) => {
            compare_primary(prev, curr, options, &mut report);
            if let (Some(prev_sec), Some(curr_sec)) = (prev_sec, curr_sec) {
                compare_secondary(prev_sec, curr_sec, options, &mut report);
            }
        }
    }

    report
}

fn compare_primary(
    prev: &StreamMeta,
    curr: &StreamMeta,
    options: DetectOptions,
    report: &mut ChangeReport,
) {
    if prev.inode != curr.inode {
        report.push(ChangeKind::Inode);
    }
    if prev.mode != curr.mode {
        report.push(ChangeKind::Mode);
    }
    if prev.links != curr.links {
        report.push(ChangeKind::LinkCount);
    }
    if prev.uid != curr.uid {
        report.push(ChangeKind::OwnerUid);
    }
    if prev.gid != curr.gid {
        report.push(ChangeKind::OwnerGid);
    }
    if prev.size != curr.size {
        report.push(ChangeKind::Size);
    }
    if options.digest && prev.digest != curr.digest {
        report.push(ChangeKind::ContentDigest);
    }
    if options.atime && prev.atime != curr.atime {
        report.push(ChangeKind::AccessTime);
    }
    if prev.mtime != curr.mtime {
        report.push(ChangeKind::ModifyTime);
    }
    if prev.ctime != curr.ctime {
        report.push(ChangeKind::ChangeTime);
    }
}

fn compare_secondary(
    prev: &StreamMeta,
    curr: &StreamMeta,
    options: DetectOptions,
    report: &mut ChangeReport,
) {
    if prev.size != curr.size {
        report.push(ChangeKind::SecondarySize);
    }
    if options.digest && prev.digest != curr.digest {
        report.push(ChangeKind::SecondaryDigest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: DetectOptions = DetectOptions { digest: false, atime: false };

    fn meta() -> StreamMeta {
        StreamMeta {
            inode: 42,
            mode: 0o100644,
            links: 1,
            uid: 1000,
            gid: 1000,
            size: 5,
            atime: 1_700_000_000,
            mtime: 1_700_000_000,
            ctime: 1_700_000_000,
            digest: None,
        }
    }

    fn present(primary: StreamMeta) -> Snapshot {
        Snapshot::Present { primary, secondary: None }
    }

    #[test]
    fn first_observation_is_never_a_change() {
        let report = detect_changes(None, &present(meta()), PLAIN);
        assert!(!report.is_changed());

        let report = detect_changes(None, &Snapshot::Absent, PLAIN);
        assert!(!report.is_changed());
    }

    #[test]
    fn two_absent_observations_are_quiet() {
        let report = detect_changes(Some(&Snapshot::Absent), &Snapshot::Absent, PLAIN);
        assert!(!report.is_changed());
    }

    #[test]
    fn creation_reports_created_only() {
        let report = detect_changes(Some(&Snapshot::Absent), &present(meta()), PLAIN);
        assert_eq!(report.kinds(), &[ChangeKind::Created]);
    }

    #[test]
    fn deletion_reports_deleted_only() {
        let report = detect_changes(Some(&present(meta())), &Snapshot::Absent, PLAIN);
        assert_eq!(report.kinds(), &[ChangeKind::Deleted]);
    }

    #[test]
    fn size_difference_alone_reports_size() {
        let prev = meta();
        let mut curr = meta();
        curr.size += 1;

        let report = detect_changes(Some(&present(prev)), &present(curr), PLAIN);
        assert_eq!(report.kinds(), &[ChangeKind::Size]);
    }

    #[test]
    fn tags_follow_the_canonical_order() {
        let prev = meta();
        let mut curr = meta();
        curr.inode += 1;
        curr.mode |= 0o111;
        curr.gid += 1;
        curr.size += 3;
        curr.mtime += 60;

        let report = detect_changes(Some(&present(prev)), &present(curr), PLAIN);
        assert_eq!(
            report.kinds(),
            &[
                ChangeKind::Inode,
                ChangeKind::Mode,
                ChangeKind::OwnerGid,
                ChangeKind::Size,
                ChangeKind::ModifyTime,
            ]
        );
    }

    #[test]
    fn access_time_is_compared_only_when_enabled() {
        let prev = meta();
        let mut curr = meta();
        curr.atime += 60;

        let report = detect_changes(Some(&present(prev)), &present(curr), PLAIN);
        assert!(!report.is_changed());

        let atime_opts = DetectOptions { digest: false, atime: true };
        let report = detect_changes(Some(&present(prev)), &present(curr), atime_opts);
        assert_eq!(report.kinds(), &[ChangeKind::AccessTime]);
    }

    #[test]
    fn atime_never_reported_under_digest_tracking() {
        // Config resolution forces atime off whenever digests are on; even a
        // real atime difference must stay silent under those options.
        let mut prev = meta();
        prev.digest = Some([0u8; 16]);
        let mut curr = meta();
        curr.digest = Some([0u8; 16]);
        curr.atime += 60;

        let digest_opts = DetectOptions { digest: true, atime: false };
        let report = detect_changes(Some(&present(prev)), &present(curr), digest_opts);
        assert!(!report.is_changed());
    }

    #[test]
    fn digest_is_compared_only_when_enabled() {
        let mut prev = meta();
        prev.digest = Some([0u8; 16]);
        let mut curr = meta();
        curr.digest = Some([1u8; 16]);

        let report = detect_changes(Some(&present(prev)), &present(curr), PLAIN);
        assert!(!report.is_changed());

        let digest_opts = DetectOptions { digest: true, atime: false };
        let report = detect_changes(Some(&present(prev)), &present(curr), digest_opts);
        assert_eq!(report.kinds(), &[ChangeKind::ContentDigest]);
    }

    #[test]
    fn secondary_stream_compares_size_then_digest() {
        let mut prev_sec = meta();
        prev_sec.size = 10;
        prev_sec.digest = Some([0u8; 16]);
        let mut curr_sec = meta();
        curr_sec.size = 20;
        curr_sec.digest = Some([1u8; 16]);

        let prev = Snapshot::Present { primary: meta(), secondary: Some(prev_sec) };
        let curr = Snapshot::Present { primary: meta(), secondary: Some(curr_sec) };

        let report = detect_changes(Some(&prev), &curr, PLAIN);
        assert_eq!(report.kinds(), &[ChangeKind::SecondarySize]);

        let digest_opts = DetectOptions { digest: true, atime: false };
        let report = detect_changes(Some(&prev), &curr, digest_opts);
        assert_eq!(
            report.kinds(),
            &[ChangeKind::SecondarySize, ChangeKind::SecondaryDigest]
        );
    }

    #[test]
    fn tags_render_as_their_wire_names() {
        assert_eq!(ChangeKind::LinkCount.to_string(), "link-count");
        assert_eq!(ChangeKind::ContentDigest.to_string(), "content-digest");
        assert_eq!(ChangeKind::Size.to_string(), "size");
    }
}
