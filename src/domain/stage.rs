//! Release stages a tag moves through on its way to production
//!
//! Promotion order is strict: `Beta < ReleaseCandidate < Release`.

use std::fmt;

/// How far a tag has progressed toward production
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseStage {
    /// Development build, `vX.Y.Z-beta.N`
    Beta,
    /// Release candidate, `vX.Y.Z-rc.N`
    ReleaseCandidate,
    /// Production release, plain `vX.Y.Z`
    Release,
}

impl ReleaseStage {
    pub const BETA_INFIX: &'static str = "-beta.";
    pub const RC_INFIX: &'static str = "-rc.";

    /// The literal infix that marks a tag of this stage
    ///
    /// `Release` has none: it is what remains when neither infix is present.
    pub fn infix(&self) -> Option<&'static str> {
        match self {
            ReleaseStage::Beta => Some(Self::BETA_INFIX),
            ReleaseStage::ReleaseCandidate => Some(Self::RC_INFIX),
            ReleaseStage::Release => None,
        }
    }

    /// The stage whose companion tag must be verified before this one may deploy
    ///
    /// Only `Release` is gated; candidates deploy without a beta prerequisite.
    pub fn prerequisite(&self) -> Option<ReleaseStage> {
        match self {
            ReleaseStage::Release => Some(ReleaseStage::ReleaseCandidate),
            ReleaseStage::Beta | ReleaseStage::ReleaseCandidate => None,
        }
    }

    /// Derive the stage from a tag name suffix
    ///
    /// `-beta.` is checked before `-rc.`; absence of both yields `Release`.
    pub fn from_tag_name(name: &str) -> Self {
        if name.contains(Self::BETA_INFIX) {
            ReleaseStage::Beta
        } else if name.contains(Self::RC_INFIX) {
            ReleaseStage::ReleaseCandidate
        } else {
            ReleaseStage::Release
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStage::Beta => write!(f, "beta"),
            ReleaseStage::ReleaseCandidate => write!(f, "release-candidate"),
            ReleaseStage::Release => write!(f, "release"),
        }
    }
}
