use crate::domain::{BaseVersion, BranchTarget, ReleaseStage};
use std::fmt;

/// Why a Release tag was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No `-rc.N` tag exists for the base version
    MissingCompanion { base_version: BaseVersion },
    /// The companion's commit has no successful pipeline on the homologation target
    CompanionNotVerified { companion: String, branch: BranchTarget },
    /// The companion's commit is not in the homologation branch history
    CompanionNotOnBranch { companion: String, branch: String },
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::MissingCompanion { base_version } => write!(
                f,
                "no corresponding release-candidate tag found for {}",
                base_version
            ),
            Denial::CompanionNotVerified { companion, branch } => write!(
                f,
                "release-candidate tag {} did not pass the homologation pipeline on '{}'",
                companion, branch
            ),
            Denial::CompanionNotOnBranch { companion, branch } => write!(
                f,
                "release-candidate tag {} points to a commit that is not on the homologation branch '{}'",
                companion, branch
            ),
        }
    }
}

/// Outcome of a promotion decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub tag: String,
    pub stage: ReleaseStage,
    pub allowed: bool,
    pub reason: String,
    /// Companion tag that was verified, when the stage required one
    pub companion: Option<String>,
    /// Structured cause, present exactly when `allowed` is false
    pub denial: Option<Denial>,
}

impl Verdict {
    pub fn allow(tag: impl Into<String>, stage: ReleaseStage, reason: impl Into<String>) -> Self {
        Verdict {
            tag: tag.into(),
            stage,
            allowed: true,
            reason: reason.into(),
            companion: None,
            denial: None,
        }
    }

    pub fn deny(tag: impl Into<String>, stage: ReleaseStage, denial: Denial) -> Self {
        Verdict {
            tag: tag.into(),
            stage,
            allowed: false,
            reason: denial.to_string(),
            companion: None,
            denial: Some(denial),
        }
    }

    pub fn with_companion(mut self, companion: impl Into<String>) -> Self {
        self.companion = Some(companion.into());
        self
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.allowed { "ALLOWED" } else { "DENIED" };
        write!(f, "{} {} ({}): {}", outcome, self.tag, self.stage, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_has_no_denial() {
        let v = Verdict::allow("v1.0.0-beta.1", ReleaseStage::Beta, "ok");
        assert!(v.allowed);
        assert!(v.denial.is_none());
        assert_eq!(v.reason, "ok");
    }

    #[test]
    fn test_deny_reason_comes_from_denial() {
        let denial = Denial::MissingCompanion {
            base_version: BaseVersion::new(3, 1, 0),
        };
        let v = Verdict::deny("v3.1.0", ReleaseStage::Release, denial.clone());
        assert!(!v.allowed);
        assert_eq!(v.denial, Some(denial));
        assert_eq!(
            v.reason,
            "no corresponding release-candidate tag found for v3.1.0"
        );
    }

    #[test]
    fn test_denial_messages_identify_the_failed_check() {
        let not_verified = Denial::CompanionNotVerified {
            companion: "v3.1.0-rc.2".to_string(),
            branch: BranchTarget::parse("homologation").unwrap(),
        };
        assert!(not_verified
            .to_string()
            .contains("did not pass the homologation pipeline"));
        assert!(not_verified.to_string().contains("v3.1.0-rc.2"));

        let missing = Denial::MissingCompanion {
            base_version: BaseVersion::new(1, 0, 0),
        };
        assert!(missing
            .to_string()
            .contains("no corresponding release-candidate tag found"));
    }

    #[test]
    fn test_verdict_display() {
        let v = Verdict::allow("v3.1.0", ReleaseStage::Release, "verified")
            .with_companion("v3.1.0-rc.2");
        assert_eq!(v.to_string(), "ALLOWED v3.1.0 (release): verified");
        assert_eq!(v.companion.as_deref(), Some("v3.1.0-rc.2"));
    }
}
