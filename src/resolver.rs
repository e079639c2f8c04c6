//! Companion tag resolution
//!
//! Finds the highest-numbered tag of a given stage for one base version.

use tracing::{debug, warn};

use crate::domain::{candidate_ordinal, classify, BaseVersion, ReleaseStage, Tag};

/// Find the most recent companion tag of `stage` for `base`
///
/// Only tags whose base version equals `base` exactly are considered, so
/// `v1.2.30-rc.5` never stands in for `v1.2.3`. Candidate numbers compare
/// numerically; a tag whose trailing number cannot be parsed ranks as 0.
/// On equal numbers the first tag in `tags` wins.
///
/// Returns `None` when nothing matches; callers decide what absence means.
pub fn find_latest<'a>(tags: &'a [Tag], base: &BaseVersion, stage: ReleaseStage) -> Option<&'a Tag> {
    let mut best: Option<(&Tag, u64)> = None;

    for tag in tags {
        let (tag_base, tag_stage) = match classify(&tag.name) {
            Ok(parsed) => parsed,
            Err(_) => {
                debug!(tag = %tag.name, "skipping tag without a base version");
                continue;
            }
        };

        if tag_base != *base || tag_stage != stage {
            continue;
        }

        let ordinal = match candidate_ordinal(&tag.name, stage) {
            Some(n) => n,
            None => {
                if stage.infix().is_some() {
                    warn!(tag = %tag.name, "candidate number not parseable, ranking as 0");
                }
                0
            }
        };

        if best.is_none_or(|(_, current)| ordinal > current) {
            best = Some((tag, ordinal));
        }
    }

    let latest = best.map(|(tag, _)| tag);
    debug!(
        base = %base,
        stage = %stage,
        latest = latest.map(|t| t.name.as_str()).unwrap_or("<none>"),
        "resolved companion tag"
    );
    latest
}
