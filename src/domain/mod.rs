//! Domain logic - pure release-gate rules independent of the remote API

pub mod branch;
pub mod pipeline;
pub mod stage;
pub mod tag;
pub mod verdict;
pub mod version;

pub use branch::BranchTarget;
pub use pipeline::{PipelineFilter, PipelineRun, PipelineStatus};
pub use stage::ReleaseStage;
pub use tag::{candidate_ordinal, classify, Tag};
pub use verdict::{Denial, Verdict};
pub use version::BaseVersion;
