use crate::domain::{PipelineFilter, PipelineRun, Tag};
use crate::error::{GateError, Result};
use crate::source::DataSource;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory data source for testing without a GitLab instance
///
/// Data is not scoped per project; every project id sees the same state.
#[derive(Default)]
pub struct MockDataSource {
    tags: Vec<Tag>,
    pipelines: Vec<PipelineRun>,
    branch_commits: HashMap<String, Vec<String>>,
    fault: Option<String>,
    calls: AtomicUsize,
}

impl MockDataSource {
    /// Create a new empty mock data source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag pointing at a commit
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.push(Tag::new(name, commit_id));
    }

    /// Record a pipeline run
    pub fn add_pipeline(
        &mut self,
        status: &str,
        ref_name: impl Into<String>,
        commit_id: impl Into<String>,
    ) {
        self.pipelines.push(PipelineRun::new(status, ref_name, commit_id));
    }

    /// Append a commit to a branch's history
    pub fn add_branch_commit(&mut self, branch: impl Into<String>, commit_id: impl Into<String>) {
        self.branch_commits
            .entry(branch.into())
            .or_default()
            .push(commit_id.into());
    }

    /// Make every subsequent query fail with a data source fault
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.fault = Some(message.into());
    }

    /// Number of queries served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fault {
            Some(msg) => Err(GateError::data_source(msg.clone())),
            None => Ok(()),
        }
    }
}

impl DataSource for MockDataSource {
    fn list_tags(&self, _project_id: &str, search: Option<&str>) -> Result<Vec<Tag>> {
        self.check()?;
        Ok(self
            .tags
            .iter()
            .filter(|t| search.is_none_or(|s| t.name.contains(s)))
            .cloned()
            .collect())
    }

    fn tag_commit(&self, _project_id: &str, tag_name: &str) -> Result<String> {
        self.check()?;
        self.tags
            .iter()
            .find(|t| t.name == tag_name)
            .map(|t| t.commit_id.clone())
            .ok_or_else(|| GateError::data_source(format!("Tag not found: {}", tag_name)))
    }

    fn list_pipelines(&self, _project_id: &str, filter: &PipelineFilter) -> Result<Vec<PipelineRun>> {
        self.check()?;
        Ok(self
            .pipelines
            .iter()
            .filter(|run| filter.accepts(run))
            .cloned()
            .collect())
    }

    fn list_commits(&self, _project_id: &str, branch: &str) -> Result<Vec<String>> {
        self.check()?;
        Ok(self.branch_commits.get(branch).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_list_tags_with_search() {
        let mut source = MockDataSource::new();
        source.add_tag("v1.0.0-rc.1", "a");
        source.add_tag("v2.0.0-rc.1", "b");

        assert_eq!(source.list_tags("p", None).unwrap().len(), 2);
        let found = source.list_tags("p", Some("v2.0.0")).unwrap();
        assert_eq!(found, vec![Tag::new("v2.0.0-rc.1", "b")]);
    }

    #[test]
    fn test_mock_tag_commit() {
        let mut source = MockDataSource::new();
        source.add_tag("v1.0.0", "abc");
        assert_eq!(source.tag_commit("p", "v1.0.0").unwrap(), "abc");
        assert!(source.tag_commit("p", "v9.9.9").is_err());
    }

    #[test]
    fn test_mock_pipeline_filter() {
        let mut source = MockDataSource::new();
        source.add_pipeline("success", "homologation", "abc");
        source.add_pipeline("failed", "main", "abc");
        source.add_pipeline("success", "main", "def");

        let filter = PipelineFilter::for_commit("abc");
        assert_eq!(source.list_pipelines("p", &filter).unwrap().len(), 2);
        let filter = filter.with_ref("main");
        let runs = source.list_pipelines("p", &filter).unwrap();
        assert_eq!(runs.len(), 1);
        assert!(!runs[0].status.is_success());
    }

    #[test]
    fn test_mock_branch_commits() {
        let mut source = MockDataSource::new();
        source.add_branch_commit("homologation", "abc");
        assert_eq!(source.list_commits("p", "homologation").unwrap(), vec!["abc"]);
        assert!(source.list_commits("p", "main").unwrap().is_empty());
    }

    #[test]
    fn test_mock_fault_applies_to_every_query() {
        let mut source = MockDataSource::new();
        source.fail_with("401 Unauthorized");

        assert!(matches!(source.list_tags("p", None), Err(GateError::DataSource(_))));
        assert!(source.tag_commit("p", "v1.0.0").is_err());
        assert!(source.list_pipelines("p", &PipelineFilter::default()).is_err());
        assert!(source.list_commits("p", "main").is_err());
        assert_eq!(source.call_count(), 4);
    }
}
