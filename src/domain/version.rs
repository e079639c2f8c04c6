use std::fmt;

/// The `vMAJOR.MINOR.PATCH` prefix shared by every stage of one release line
///
/// Equality is exact on all three components, so `v1.2.3` never equals `v1.2.30`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseVersion(semver::Version);

impl BaseVersion {
    /// Create a new base version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        BaseVersion(semver::Version::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// The underlying semantic version, without pre-release or build metadata
    pub fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for BaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
