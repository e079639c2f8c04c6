use std::fmt;

use crate::error::{GateError, Result};

/// Which pipeline refs count as "ran on the branch"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchTarget {
    /// A single concrete branch, e.g. `homologation`
    Exact(String),
    /// Every branch whose name starts with the prefix, e.g. `release/`
    Family(String),
}

impl BranchTarget {
    /// Parse a branch argument; a trailing `*` turns it into a family prefix
    ///
    /// `release/*` -> `Family("release/")`, `homologation` -> `Exact("homologation")`.
    /// An empty name or a bare `*` would match every ref and is rejected.
    pub fn parse(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        match arg.strip_suffix('*') {
            Some(prefix) if prefix.trim().is_empty() => Err(GateError::config(format!(
                "branch family '{}' has an empty prefix and would match every branch",
                arg
            ))),
            Some(prefix) => Ok(BranchTarget::Family(prefix.to_string())),
            None if arg.is_empty() => Err(GateError::config("branch name must not be empty")),
            None => Ok(BranchTarget::Exact(arg.to_string())),
        }
    }

    /// Check whether a pipeline ref satisfies this target
    pub fn matches(&self, ref_name: &str) -> bool {
        match self {
            BranchTarget::Exact(branch) => ref_name == branch,
            BranchTarget::Family(prefix) => ref_name.starts_with(prefix.as_str()),
        }
    }

    /// The concrete branch name, if this target names exactly one branch
    pub fn exact(&self) -> Option<&str> {
        match self {
            BranchTarget::Exact(branch) => Some(branch),
            BranchTarget::Family(_) => None,
        }
    }
}

impl fmt::Display for BranchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchTarget::Exact(branch) => write!(f, "{}", branch),
            BranchTarget::Family(prefix) => write!(f, "{}*", prefix),
        }
    }
}
