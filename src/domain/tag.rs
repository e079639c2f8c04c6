use crate::domain::{BaseVersion, ReleaseStage};
use crate::error::{GateError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// A remote tag and the commit it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub commit_id: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }

    /// Classify this tag's name
    pub fn classify(&self) -> Result<(BaseVersion, ReleaseStage)> {
        classify(&self.name)
    }
}

fn base_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v([0-9]+)\.([0-9]+)\.([0-9]+)").expect("base version pattern is valid"))
}

/// Parse a tag name into its base version and release stage
///
/// The name must start with `v<digits>.<digits>.<digits>`. Anything after the
/// base version only matters for stage derivation (see [`ReleaseStage::from_tag_name`]).
///
/// # Examples
/// ```
/// use tag_gate::domain::{classify, BaseVersion, ReleaseStage};
///
/// let (base, stage) = classify("v1.2.3-rc.2").unwrap();
/// assert_eq!(base, BaseVersion::new(1, 2, 3));
/// assert_eq!(stage, ReleaseStage::ReleaseCandidate);
/// assert!(classify("not-a-tag").is_err());
/// ```
pub fn classify(tag_name: &str) -> Result<(BaseVersion, ReleaseStage)> {
    let caps = base_version_regex().captures(tag_name).ok_or_else(|| {
        GateError::format(format!(
            "'{}' does not start with vMAJOR.MINOR.PATCH",
            tag_name
        ))
    })?;

    let component = |i: usize| -> Result<u64> {
        caps[i].parse::<u64>().map_err(|_| {
            GateError::format(format!(
                "'{}' has an out-of-range version component '{}'",
                tag_name, &caps[i]
            ))
        })
    };

    let base = BaseVersion::new(component(1)?, component(2)?, component(3)?);
    Ok((base, ReleaseStage::from_tag_name(tag_name)))
}

/// Trailing candidate number after the stage infix (`rc.10` -> 10)
///
/// Returns `None` when the stage has no infix, the infix is absent, or the
/// text after it is not a plain integer.
pub fn candidate_ordinal(tag_name: &str, stage: ReleaseStage) -> Option<u64> {
    let infix = stage.infix()?;
    let (_, tail) = tag_name.rsplit_once(infix)?;
    tail.parse::<u64>().ok()
}
