//! Promotion policy - composes classification, companion resolution and
//! pipeline verification into an allow/deny [Verdict].
//!
//! | Stage | Rule |
//! |---|---|
//! | Beta | always allowed |
//! | ReleaseCandidate | always allowed |
//! | Release | latest `-rc.N` of the same base version must have a successful homologation pipeline |

use tracing::{debug, info};

use crate::domain::{classify, BranchTarget, Denial, ReleaseStage, Tag, Verdict};
use crate::error::Result;
use crate::resolver::find_latest;
use crate::source::DataSource;
use crate::verifier::{commit_on_branch, verify};

pub const BETA_REASON: &str = "development-stage tags deploy without gating";
pub const CANDIDATE_REASON: &str = "candidate-stage tags deploy without gating";

/// Stage-specific gating rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionPolicy {
    /// Where the release candidate must have passed
    pub homologation: BranchTarget,
    /// Also require the candidate commit to be in the homologation branch history
    pub require_commit_on_branch: bool,
}

impl Default for PromotionPolicy {
    fn default() -> Self {
        PromotionPolicy {
            homologation: BranchTarget::Exact("homologation".to_string()),
            require_commit_on_branch: false,
        }
    }
}

impl PromotionPolicy {
    pub fn new(homologation: BranchTarget) -> Self {
        PromotionPolicy {
            homologation,
            ..Self::default()
        }
    }

    pub fn with_commit_on_branch(mut self, required: bool) -> Self {
        self.require_commit_on_branch = required;
        self
    }

    /// Decide whether `tag_name` may advance, given every known tag of the project
    ///
    /// A malformed tag name fails with a format error before any query is made.
    /// Denials are `Ok` verdicts; only data source faults are `Err`.
    pub fn decide<S: DataSource + ?Sized>(
        &self,
        source: &S,
        project_id: &str,
        tag_name: &str,
        all_tags: &[Tag],
    ) -> Result<Verdict> {
        let (base, stage) = classify(tag_name)?;
        debug!(tag = tag_name, base = %base, stage = %stage, "classified tag");

        let verdict = match stage {
            ReleaseStage::Beta => Verdict::allow(tag_name, stage, BETA_REASON),
            ReleaseStage::ReleaseCandidate => Verdict::allow(tag_name, stage, CANDIDATE_REASON),
            ReleaseStage::Release => {
                let Some(companion) = find_latest(all_tags, &base, ReleaseStage::ReleaseCandidate)
                else {
                    let verdict =
                        Verdict::deny(tag_name, stage, Denial::MissingCompanion { base_version: base });
                    info!(tag = tag_name, allowed = false, "{}", verdict.reason);
                    return Ok(verdict);
                };
                self.check_companion(source, project_id, tag_name, companion)?
            }
        };

        info!(tag = tag_name, allowed = verdict.allowed, "{}", verdict.reason);
        Ok(verdict)
    }

    /// Classify, list candidate tags for the base version, then [Self::decide]
    pub fn evaluate<S: DataSource + ?Sized>(
        &self,
        source: &S,
        project_id: &str,
        tag_name: &str,
    ) -> Result<Verdict> {
        let (base, _) = classify(tag_name)?;
        let tags = source.list_tags(project_id, Some(&base.to_string()))?;
        debug!(count = tags.len(), search = %base, "listed tags");
        self.decide(source, project_id, tag_name, &tags)
    }

    fn check_companion<S: DataSource + ?Sized>(
        &self,
        source: &S,
        project_id: &str,
        tag_name: &str,
        companion: &Tag,
    ) -> Result<Verdict> {
        let stage = ReleaseStage::Release;
        let commit_id = if companion.commit_id.is_empty() {
            source.tag_commit(project_id, &companion.name)?
        } else {
            companion.commit_id.clone()
        };

        if !verify(source, project_id, &commit_id, &self.homologation)? {
            let denial = Denial::CompanionNotVerified {
                companion: companion.name.clone(),
                branch: self.homologation.clone(),
            };
            return Ok(Verdict::deny(tag_name, stage, denial).with_companion(&companion.name));
        }

        if self.require_commit_on_branch {
            match self.homologation.exact() {
                Some(branch) => {
                    if !commit_on_branch(source, project_id, &commit_id, branch)? {
                        let denial = Denial::CompanionNotOnBranch {
                            companion: companion.name.clone(),
                            branch: branch.to_string(),
                        };
                        return Ok(Verdict::deny(tag_name, stage, denial).with_companion(&companion.name));
                    }
                }
                None => debug!(
                    target = %self.homologation,
                    "branch membership check skipped for branch family"
                ),
            }
        }

        let reason = format!(
            "release-candidate tag {} passed the homologation pipeline on '{}'",
            companion.name, self.homologation
        );
        Ok(Verdict::allow(tag_name, stage, reason).with_companion(&companion.name))
    }
}
