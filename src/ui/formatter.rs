//! Pure formatting functions for UI output.
//!
//! Functions here build strings only; printing happens in the parent module.

use crate::cli::orchestration::Outcome;
use crate::domain::{BranchTarget, Verdict};

/// Format a promotion verdict.
///
/// Allowed verdicts get a green checkmark, denials a red cross. The reason is
/// always included so operators can tell which check failed.
pub fn format_verdict(verdict: &Verdict) -> String {
    let mark = if verdict.allowed {
        console::style("✓ ALLOWED").green().bold()
    } else {
        console::style("✗ DENIED").red().bold()
    };

    let mut out = format!("{} {} ({}): {}", mark, verdict.tag, verdict.stage, verdict.reason);
    if let Some(companion) = &verdict.companion {
        out.push_str(&format!("\n  companion: {}", companion));
    }
    out
}

/// Format the result of verifying a tag against a branch target.
pub fn format_verification(tag: &str, target: &BranchTarget, verified: bool) -> String {
    if verified {
        format!(
            "{} tag {} has a successful pipeline on '{}'",
            console::style("✓ VERIFIED").green().bold(),
            tag,
            target
        )
    } else {
        format!(
            "{} tag {} has no successful pipeline on '{}'",
            console::style("✗ NOT VERIFIED").red().bold(),
            tag,
            target
        )
    }
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Decision(verdict) => format_verdict(verdict),
        Outcome::Verification {
            tag,
            target,
            verified,
        } => format_verification(tag, target, *verified),
    }
}
