use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a CI pipeline run
///
/// Only `Success` counts toward verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PipelineStatus {
    Success,
    Failed,
    Running,
    /// Any other remote status (pending, canceled, skipped, manual, ...)
    Other(String),
}

impl PipelineStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineStatus::Success)
    }
}

impl From<String> for PipelineStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => PipelineStatus::Success,
            "failed" => PipelineStatus::Failed,
            "running" => PipelineStatus::Running,
            _ => PipelineStatus::Other(s),
        }
    }
}

impl From<&str> for PipelineStatus {
    fn from(s: &str) -> Self {
        PipelineStatus::from(s.to_string())
    }
}

impl From<PipelineStatus> for String {
    fn from(status: PipelineStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStatus::Success => write!(f, "success"),
            PipelineStatus::Failed => write!(f, "failed"),
            PipelineStatus::Running => write!(f, "running"),
            PipelineStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A single CI execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    pub status: PipelineStatus,
    /// Branch or tag the run was triggered from
    pub ref_name: String,
    pub commit_id: String,
}

impl PipelineRun {
    pub fn new(
        status: impl Into<PipelineStatus>,
        ref_name: impl Into<String>,
        commit_id: impl Into<String>,
    ) -> Self {
        PipelineRun {
            status: status.into(),
            ref_name: ref_name.into(),
            commit_id: commit_id.into(),
        }
    }
}

/// Server-side narrowing for a pipeline listing; `None` means unfiltered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineFilter {
    pub commit_id: Option<String>,
    pub ref_name: Option<String>,
}

impl PipelineFilter {
    pub fn for_commit(commit_id: impl Into<String>) -> Self {
        PipelineFilter {
            commit_id: Some(commit_id.into()),
            ref_name: None,
        }
    }

    pub fn with_ref(mut self, ref_name: impl Into<String>) -> Self {
        self.ref_name = Some(ref_name.into());
        self
    }

    /// Check a run against this filter (used by in-memory sources)
    pub fn accepts(&self, run: &PipelineRun) -> bool {
        self.commit_id.as_deref().is_none_or(|c| c == run.commit_id)
            && self.ref_name.as_deref().is_none_or(|r| r == run.ref_name)
    }
}
