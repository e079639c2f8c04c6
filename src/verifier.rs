//! Pipeline verification
//!
//! Answers "did a successful pipeline run against this commit on this branch?".
//! `Ok(false)` means verified-no; `Err` means the question could not be answered.

use tracing::debug;

use crate::domain::{BranchTarget, PipelineFilter};
use crate::error::Result;
use crate::source::DataSource;

/// Check whether `commit_id` has a successful pipeline on `target`
///
/// An exact branch is filtered server-side by ref. A branch family lists every
/// run for the commit and keeps those whose ref starts with the family prefix.
/// Zero runs and zero successful runs both yield `Ok(false)`; source faults propagate.
pub fn verify<S: DataSource + ?Sized>(
    source: &S,
    project_id: &str,
    commit_id: &str,
    target: &BranchTarget,
) -> Result<bool> {
    let filter = match target {
        BranchTarget::Exact(branch) => PipelineFilter::for_commit(commit_id).with_ref(branch.as_str()),
        BranchTarget::Family(_) => PipelineFilter::for_commit(commit_id),
    };

    let runs = source.list_pipelines(project_id, &filter)?;
    let verified = runs
        .iter()
        .filter(|run| run.commit_id == commit_id && target.matches(&run.ref_name))
        .any(|run| run.status.is_success());

    debug!(
        commit = commit_id,
        target = %target,
        runs = runs.len(),
        verified,
        "pipeline verification"
    );
    Ok(verified)
}

/// Verify the commit a tag points to, resolving it through the data source first
pub fn verify_tag<S: DataSource + ?Sized>(
    source: &S,
    project_id: &str,
    tag_name: &str,
    target: &BranchTarget,
) -> Result<bool> {
    let commit_id = source.tag_commit(project_id, tag_name)?;
    debug!(tag = tag_name, commit = %commit_id, "resolved tag commit");
    verify(source, project_id, &commit_id, target)
}

/// Check that `commit_id` is part of `branch`'s history
pub fn commit_on_branch<S: DataSource + ?Sized>(
    source: &S,
    project_id: &str,
    commit_id: &str,
    branch: &str,
) -> Result<bool> {
    let contained = source.branch_contains(project_id, branch, commit_id)?;
    debug!(commit = commit_id, branch, contained, "branch membership");
    Ok(contained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use crate::source::MockDataSource;

    #[test]
    fn test_empty_pipeline_list_is_false_not_fault() {
        let source = MockDataSource::new();
        let target = BranchTarget::parse("homologation").unwrap();
        assert!(!verify(&source, "p", "abc", &target).unwrap());
    }

    #[test]
    fn test_success_on_exact_branch() {
        let mut source = MockDataSource::new();
        source.add_pipeline("failed", "homologation", "abc");
        source.add_pipeline("success", "homologation", "abc");
        assert!(verify(&source, "p", "abc", &BranchTarget::parse("homologation").unwrap()).unwrap());
    }

    #[test]
    fn test_only_failed_runs_is_false() {
        let mut source = MockDataSource::new();
        source.add_pipeline("failed", "homologation", "abc");
        source.add_pipeline("running", "homologation", "abc");
        assert!(!verify(&source, "p", "abc", &BranchTarget::parse("homologation").unwrap()).unwrap());
    }

    #[test]
    fn test_success_elsewhere_does_not_count() {
        let mut source = MockDataSource::new();
        source.add_pipeline("success", "main", "abc");
        source.add_pipeline("success", "homologation", "other");
        assert!(!verify(&source, "p", "abc", &BranchTarget::parse("homologation").unwrap()).unwrap());
    }

    #[test]
    fn test_family_prefix_match() {
        let mut source = MockDataSource::new();
        source.add_pipeline("failed", "release/1.0", "abc");
        source.add_pipeline("success", "feature/release/1.0", "abc");
        let target = BranchTarget::parse("release/*").unwrap();
        assert!(!verify(&source, "p", "abc", &target).unwrap());

        source.add_pipeline("success", "release/1.1", "abc");
        assert!(verify(&source, "p", "abc", &target).unwrap());
    }

    #[test]
    fn test_fault_propagates() {
        let mut source = MockDataSource::new();
        source.fail_with("connection refused");
        let err = verify(&source, "p", "abc", &BranchTarget::parse("homologation").unwrap()).unwrap_err();
        assert!(matches!(err, GateError::DataSource(_)));
    }

    #[test]
    fn test_verify_tag_resolves_commit() {
        let mut source = MockDataSource::new();
        source.add_tag("v1.0.0-rc.1", "abc");
        source.add_pipeline("success", "staging", "abc");
        assert!(verify_tag(&source, "p", "v1.0.0-rc.1", &BranchTarget::parse("staging").unwrap()).unwrap());
        assert!(!verify_tag(&source, "p", "v1.0.0-rc.1", &BranchTarget::parse("main").unwrap()).unwrap());
    }

    #[test]
    fn test_verify_tag_unknown_tag_is_fault() {
        let source = MockDataSource::new();
        assert!(verify_tag(&source, "p", "v1.0.0", &BranchTarget::parse("main").unwrap()).is_err());
    }

    #[test]
    fn test_commit_on_branch() {
        let mut source = MockDataSource::new();
        source.add_branch_commit("homologation", "abc");
        assert!(commit_on_branch(&source, "p", "abc", "homologation").unwrap());
        assert!(!commit_on_branch(&source, "p", "def", "homologation").unwrap());
    }
}
