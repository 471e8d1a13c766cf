use super::structs::{MatchVerdict, StageOutcome};
use crate::local::structs::LocalMediaDescriptor;
use crate::remote::structs::RemoteMediaDescriptor;
use chrono::{DateTime, Utc};
use tracing::debug;

fn record(trail: &mut Vec<StageOutcome>, filename: &str, outcome: StageOutcome) {
    debug!(filename, outcome = %outcome, "Match stage");
    trail.push(outcome);
}

/// Decides whether `local` already exists in the album described by `remote_items`.
///
/// Stages, each of which may end the decision:
/// 1. The first remote item with exactly the same filename is the candidate. Without one
///    the file does not exist in the album.
/// 2. MIME types must be equal.
/// 3. If the local file has a capture time it must equal the remote creation time exactly.
///    A mismatch here is final, whatever the tolerance.
/// 4. Without a capture time, the file's access time must lie strictly within
///    `tolerance_minutes` of the remote creation time. A tolerance of zero disables this.
///
/// Matching is pure: the same inputs always produce the same verdict.
pub fn decide(
    local: &LocalMediaDescriptor,
    remote_items: &[RemoteMediaDescriptor],
    tolerance_minutes: u32,
) -> MatchVerdict {
    let filename = local.filename.as_str();
    let mut trail = Vec::with_capacity(4);

    let Some(remote) = remote_items.iter().find(|r| r.filename == local.filename) else {
        record(&mut trail, filename, StageOutcome::NoFilenameMatch);
        return MatchVerdict {
            exists_in_album: false,
            is_match: false,
            trail,
        };
    };
    record(&mut trail, filename, StageOutcome::FilenameMatch);

    if local.mime_type != remote.mime_type {
        record(
            &mut trail,
            filename,
            StageOutcome::MimeMismatch {
                local: local.mime_type.clone(),
                remote: remote.mime_type.clone(),
            },
        );
        return MatchVerdict {
            exists_in_album: true,
            is_match: false,
            trail,
        };
    }
    record(&mut trail, filename, StageOutcome::MimeMatch);

    let remote_time = remote.creation_time();
    let outcome = match local.capture_time {
        Some(capture_time) => compare_capture_time(capture_time, remote_time),
        None => compare_access_time(local.fs_access_time, remote_time, tolerance_minutes),
    };
    let is_match = matches!(
        outcome,
        StageOutcome::CaptureTimeMatch | StageOutcome::AccessTimeWithinTolerance { .. }
    );
    record(&mut trail, filename, outcome);

    MatchVerdict {
        exists_in_album: true,
        is_match,
        trail,
    }
}

fn compare_capture_time(
    capture_time: DateTime<Utc>,
    remote_time: Option<DateTime<Utc>>,
) -> StageOutcome {
    if remote_time == Some(capture_time) {
        StageOutcome::CaptureTimeMatch
    } else {
        StageOutcome::CaptureTimeMismatch {
            local: capture_time,
            remote: remote_time,
        }
    }
}

fn compare_access_time(
    access_time: DateTime<Utc>,
    remote_time: Option<DateTime<Utc>>,
    tolerance_minutes: u32,
) -> StageOutcome {
    if tolerance_minutes == 0 {
        return StageOutcome::FallbackDisabled;
    }
    let Some(remote_time) = remote_time else {
        return StageOutcome::RemoteTimeMissing;
    };

    let delta = access_time - remote_time;
    let tolerance_ms = i64::from(tolerance_minutes) * 60_000;
    let delta_seconds = delta.num_seconds();
    if delta.num_milliseconds().abs() < tolerance_ms {
        StageOutcome::AccessTimeWithinTolerance { delta_seconds }
    } else {
        StageOutcome::AccessTimeOutsideTolerance { delta_seconds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::detect_mime;
    use chrono::{TimeDelta, TimeZone};
    use std::path::{Path, PathBuf};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn local(
        filename: &str,
        mime_type: &str,
        capture_time: Option<DateTime<Utc>>,
        access_time: DateTime<Utc>,
    ) -> LocalMediaDescriptor {
        LocalMediaDescriptor {
            path: PathBuf::from("/photos").join(filename),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            capture_time,
            fs_access_time: access_time,
            fs_change_time: access_time,
            fs_modify_time: access_time,
        }
    }

    fn remote(filename: &str, mime_type: &str, creation_time: &str) -> RemoteMediaDescriptor {
        RemoteMediaDescriptor {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            creation_time_raw: creation_time.to_string(),
        }
    }

    #[test]
    fn test_exact_capture_time_match() {
        // 11:00 BST taken in London, uploaded with a UTC creation time.
        let file = local(
            "IMG_0001.jpg",
            "image/jpeg",
            Some(utc(2021, 6, 1, 10, 0, 0)),
            utc(2024, 1, 1, 0, 0, 0),
        );
        let index = [remote("IMG_0001.jpg", "image/jpeg", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 0);

        assert!(verdict.exists_in_album);
        assert!(verdict.is_match);
        assert!(!verdict.should_upload());
        assert_eq!(
            verdict.trail,
            [
                StageOutcome::FilenameMatch,
                StageOutcome::MimeMatch,
                StageOutcome::CaptureTimeMatch
            ]
        );
    }

    #[test]
    fn test_capture_time_mismatch_without_tolerance() {
        let file = local(
            "IMG_0001.jpg",
            "image/jpeg",
            Some(utc(2021, 6, 1, 11, 0, 0)),
            utc(2021, 6, 1, 10, 0, 0),
        );
        let index = [remote("IMG_0001.jpg", "image/jpeg", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 0);

        assert!(verdict.exists_in_album);
        assert!(!verdict.is_match);
        assert_eq!(
            verdict.deciding_outcome(),
            Some(&StageOutcome::CaptureTimeMismatch {
                local: utc(2021, 6, 1, 11, 0, 0),
                remote: Some(utc(2021, 6, 1, 10, 0, 0)),
            })
        );
    }

    #[test]
    fn test_capture_time_mismatch_never_falls_back() {
        // Access time would be within tolerance, but a present capture time is authoritative.
        let file = local(
            "IMG_0001.jpg",
            "image/jpeg",
            Some(utc(2021, 6, 1, 11, 0, 0)),
            utc(2021, 6, 1, 10, 1, 0),
        );
        let index = [remote("IMG_0001.jpg", "image/jpeg", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 10);

        assert!(!verdict.is_match);
        assert_eq!(verdict.access_time_delta_seconds(), None);
    }

    #[test]
    fn test_access_time_fallback_within_tolerance() {
        let file = local(
            "VID_0002.mp4",
            "video/mp4",
            None,
            utc(2021, 6, 1, 10, 4, 0),
        );
        let index = [remote("VID_0002.mp4", "video/mp4", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 10);

        assert!(verdict.is_match);
        assert_eq!(verdict.access_time_delta_seconds(), Some(240));
    }

    #[test]
    fn test_webm_remapped_to_mp4_matches_remote() {
        let mime_type = detect_mime(Path::new("clip.webm"), None);
        assert_eq!(mime_type, "video/mp4");

        let file = local("clip.webm", &mime_type, None, utc(2021, 6, 1, 10, 0, 30));
        let index = [remote("clip.webm", "video/mp4", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 5);

        assert!(verdict.is_match);
        assert!(verdict.trail.contains(&StageOutcome::MimeMatch));
    }

    #[test]
    fn test_empty_index() {
        let file = local("a.jpg", "image/jpeg", None, utc(2021, 6, 1, 10, 0, 0));

        let verdict = decide(&file, &[], 10);

        assert!(!verdict.exists_in_album);
        assert!(!verdict.is_match);
        assert!(verdict.should_upload());
        assert_eq!(verdict.trail, [StageOutcome::NoFilenameMatch]);
    }

    #[test]
    fn test_filename_comparison_is_case_sensitive() {
        let file = local("IMG_1.JPG", "image/jpeg", None, utc(2021, 6, 1, 10, 0, 0));
        let index = [remote("img_1.jpg", "image/jpeg", "2021-06-01T10:00:00Z")];

        assert!(!decide(&file, &index, 10).exists_in_album);
    }

    #[test]
    fn test_mime_mismatch_stops() {
        let file = local("a.heic", "image/heif", None, utc(2021, 6, 1, 10, 0, 0));
        let index = [remote("a.heic", "image/heic", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 10);

        assert!(verdict.exists_in_album);
        assert!(!verdict.is_match);
        assert_eq!(
            verdict.trail.last(),
            Some(&StageOutcome::MimeMismatch {
                local: "image/heif".to_string(),
                remote: "image/heic".to_string(),
            })
        );
    }

    #[test]
    fn test_first_filename_match_is_the_only_candidate() {
        let file = local(
            "a.jpg",
            "image/jpeg",
            Some(utc(2021, 6, 1, 10, 0, 0)),
            utc(2021, 6, 1, 10, 0, 0),
        );
        let index = [
            remote("a.jpg", "image/jpeg", "2020-01-01T00:00:00Z"),
            remote("a.jpg", "image/jpeg", "2021-06-01T10:00:00Z"),
        ];

        assert!(!decide(&file, &index, 0).is_match);
    }

    #[test]
    fn test_tolerance_boundary_is_exclusive() {
        let remote_time = utc(2021, 6, 1, 10, 0, 0);
        let index = [remote("a.mov", "video/quicktime", "2021-06-01T10:00:00Z")];

        let at_boundary = local(
            "a.mov",
            "video/quicktime",
            None,
            remote_time + TimeDelta::minutes(10),
        );
        let verdict = decide(&at_boundary, &index, 10);
        assert!(!verdict.is_match);
        assert_eq!(
            verdict.deciding_outcome(),
            Some(&StageOutcome::AccessTimeOutsideTolerance { delta_seconds: 600 })
        );

        let inside = local(
            "a.mov",
            "video/quicktime",
            None,
            remote_time + TimeDelta::minutes(10) - TimeDelta::seconds(1),
        );
        assert!(decide(&inside, &index, 10).is_match);
    }

    #[test]
    fn test_negative_delta_uses_absolute_difference() {
        let file = local("a.mov", "video/quicktime", None, utc(2021, 6, 1, 9, 57, 0));
        let index = [remote("a.mov", "video/quicktime", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 5);

        assert!(verdict.is_match);
        assert_eq!(verdict.access_time_delta_seconds(), Some(-180));
    }

    #[test]
    fn test_zero_tolerance_disables_fallback() {
        let file = local("a.mov", "video/quicktime", None, utc(2021, 6, 1, 10, 0, 0));
        let index = [remote("a.mov", "video/quicktime", "2021-06-01T10:00:00Z")];

        let verdict = decide(&file, &index, 0);

        assert!(!verdict.is_match);
        assert_eq!(
            verdict.deciding_outcome(),
            Some(&StageOutcome::FallbackDisabled)
        );
    }

    #[test]
    fn test_missing_remote_time_never_matches() {
        let with_capture = local(
            "a.jpg",
            "image/jpeg",
            Some(utc(2021, 6, 1, 10, 0, 0)),
            utc(2021, 6, 1, 10, 0, 0),
        );
        let without_capture = local("a.jpg", "image/jpeg", None, utc(2021, 6, 1, 10, 0, 0));
        let index = [remote("a.jpg", "image/jpeg", "")];

        let verdict = decide(&with_capture, &index, 10);
        assert!(!verdict.is_match);
        assert!(matches!(
            verdict.deciding_outcome(),
            Some(StageOutcome::CaptureTimeMismatch { remote: None, .. })
        ));

        let verdict = decide(&without_capture, &index, 10);
        assert!(!verdict.is_match);
        assert_eq!(
            verdict.deciding_outcome(),
            Some(&StageOutcome::RemoteTimeMissing)
        );
    }

    #[test]
    fn test_decide_is_idempotent() {
        let file = local("b.mp4", "video/mp4", None, utc(2021, 6, 1, 10, 2, 0));
        let index = [
            remote("a.jpg", "image/jpeg", "2021-06-01T09:00:00Z"),
            remote("b.mp4", "video/mp4", "2021-06-01T10:00:00Z"),
        ];

        let first = decide(&file, &index, 3);
        let second = decide(&file, &index, 3);

        assert_eq!(first, second);
    }

    #[test]
    fn test_trail_display() {
        assert_eq!(StageOutcome::NoFilenameMatch.to_string(), "no filename match");
        assert_eq!(
            StageOutcome::AccessTimeOutsideTolerance { delta_seconds: -700 }.to_string(),
            "access time outside tolerance (-700s)"
        );
    }
}
