//! Main workflow orchestration logic
//!
//! Binds configuration, a data source and the promotion policy together.
//! Kept free of clap and of any concrete data source so it can be driven
//! from tests with [crate::source::MockDataSource].

use tracing::debug;

use crate::config::Config;
use crate::domain::{classify, BranchTarget, Verdict};
use crate::error::Result;
use crate::source::DataSource;
use crate::verifier::verify_tag;

/// What the caller asked the gate to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateCommand {
    /// Apply the promotion policy to a tag
    Decide { tag: String },
    /// Check that a tag's own commit passed a pipeline on a branch target
    Verify { tag: String, branch: String },
}

impl GateCommand {
    /// The tag under evaluation
    pub fn tag(&self) -> &str {
        match self {
            GateCommand::Decide { tag } | GateCommand::Verify { tag, .. } => tag,
        }
    }
}

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Decision(Verdict),
    Verification {
        tag: String,
        target: BranchTarget,
        verified: bool,
    },
}

impl Outcome {
    /// Whether the tag may proceed
    pub fn passed(&self) -> bool {
        match self {
            Outcome::Decision(verdict) => verdict.allowed,
            Outcome::Verification { verified, .. } => *verified,
        }
    }

    /// 0 when the tag may proceed, 1 for a denial
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Run one gate command
///
/// The tag name is classified before any remote query, so a malformed tag
/// fails fast with a format error.
pub fn run_gate_workflow<S: DataSource + ?Sized>(
    command: &GateCommand,
    config: &Config,
    source: &S,
) -> Result<Outcome> {
    match command {
        GateCommand::Decide { tag } => {
            classify(tag)?;
            let project_id = config.project_id()?;
            let policy = config.policy.to_policy()?;
            debug!(tag = %tag, project = project_id, homologation = %policy.homologation, "deciding");
            let verdict = policy.evaluate(source, project_id, tag)?;
            Ok(Outcome::Decision(verdict))
        }
        GateCommand::Verify { tag, branch } => {
            classify(tag)?;
            let project_id = config.project_id()?;
            let target = BranchTarget::parse(branch)?;
            debug!(tag = %tag, project = project_id, target = %target, "verifying");
            let verified = verify_tag(source, project_id, tag, &target)?;
            Ok(Outcome::Verification {
                tag: tag.clone(),
                target,
                verified,
            })
        }
    }
}
