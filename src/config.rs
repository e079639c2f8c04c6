use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::domain::BranchTarget;
use crate::error::{GateError, Result};
use crate::policy::PromotionPolicy;
use crate::source::GitLabSettings;

pub const DEFAULT_HOMOLOGATION_BRANCH: &str = "homologation";

/// Represents the complete configuration for tag-gate.
///
/// Secrets never live here; the API token comes from the CLI or `GITLAB_TOKEN`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_per_page() -> u32 {
    100
}

/// Where the remote API lives and how to talk to it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitLabConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        GitLabConfig {
            url: None,
            project_id: None,
            verify_tls: default_verify_tls(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

fn default_homologation_branch() -> String {
    DEFAULT_HOMOLOGATION_BRANCH.to_string()
}

/// Promotion rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Exact branch, or a family such as `release/*`
    #[serde(default = "default_homologation_branch")]
    pub homologation_branch: String,

    #[serde(default)]
    pub require_commit_on_branch: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            homologation_branch: default_homologation_branch(),
            require_commit_on_branch: false,
        }
    }
}

impl PolicyConfig {
    pub fn to_policy(&self) -> Result<PromotionPolicy> {
        let homologation = BranchTarget::parse(&self.homologation_branch)?;
        Ok(PromotionPolicy::new(homologation).with_commit_on_branch(self.require_commit_on_branch))
    }
}

/// Values supplied on the command line or through the environment.
///
/// `Some` overrides whatever the file says.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub gitlab_url: Option<String>,
    pub project_id: Option<String>,
    pub homologation_branch: Option<String>,
    pub verify_tls: Option<bool>,
}

impl Config {
    /// Apply CLI / environment values on top of the file configuration
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.gitlab_url {
            self.gitlab.url = Some(url);
        }
        if let Some(project_id) = overrides.project_id {
            self.gitlab.project_id = Some(project_id);
        }
        if let Some(branch) = overrides.homologation_branch {
            self.policy.homologation_branch = branch;
        }
        if let Some(verify_tls) = overrides.verify_tls {
            self.gitlab.verify_tls = verify_tls;
        }
        self
    }

    /// The project to query; required for any remote check
    pub fn project_id(&self) -> Result<&str> {
        self.gitlab
            .project_id
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| GateError::config("project id is not set (--project-id or GITLAB_PROJECT_ID)"))
    }

    /// Validate and build the GitLab connection settings
    pub fn gitlab_settings(&self, token: Option<&str>) -> Result<GitLabSettings> {
        let url = self
            .gitlab
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| GateError::config("GitLab URL is not set (--gitlab-url or GITLAB_URL)"))?;
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GateError::config("GitLab token is not set (--private-token or GITLAB_TOKEN)"))?;
        if !(1..=100).contains(&self.gitlab.per_page) {
            return Err(GateError::config(format!(
                "per_page must be between 1 and 100, got {}",
                self.gitlab.per_page
            )));
        }

        Ok(GitLabSettings {
            url: url.to_string(),
            token: token.to_string(),
            verify_tls: self.gitlab.verify_tls,
            timeout: Duration::from_secs(self.gitlab.timeout_secs),
            per_page: self.gitlab.per_page,
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tag-gate.toml` in current directory
/// 3. `.tag-gate.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./tag-gate.toml").exists() {
        fs::read_to_string("./tag-gate.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".tag-gate.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.policy.homologation_branch, "homologation");
        assert!(!config.policy.require_commit_on_branch);
        assert!(config.gitlab.verify_tls);
        assert_eq!(config.gitlab.per_page, 100);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("[gitlab]\nurl = \"https://gl\"\n").unwrap();
        assert_eq!(config.gitlab.url.as_deref(), Some("https://gl"));
        assert_eq!(config.gitlab.timeout_secs, 30);
        assert_eq!(config.policy, PolicyConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::default().apply(Overrides {
            gitlab_url: Some("https://gl".to_string()),
            project_id: Some("group/app".to_string()),
            homologation_branch: Some("release/*".to_string()),
            verify_tls: Some(false),
        });
        assert_eq!(config.project_id().unwrap(), "group/app");
        assert!(!config.gitlab.verify_tls);
        assert_eq!(
            config.policy.to_policy().unwrap().homologation,
            BranchTarget::Family("release/".to_string())
        );
    }

    #[test]
    fn test_missing_project_id() {
        assert!(matches!(Config::default().project_id(), Err(GateError::Config(_))));
    }

    #[test]
    fn test_gitlab_settings_validation() {
        let config = Config::default();
        assert!(config.gitlab_settings(Some("t")).is_err());

        let config = config.apply(Overrides {
            gitlab_url: Some("https://gl".to_string()),
            ..Overrides::default()
        });
        assert!(config.gitlab_settings(None).is_err());
        assert!(config.gitlab_settings(Some("  ")).is_err());

        let settings = config.gitlab_settings(Some("t")).unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(30));

        let mut bad = config;
        bad.gitlab.per_page = 500;
        assert!(bad.gitlab_settings(Some("t")).is_err());
    }

    #[test]
    fn test_wildcard_homologation_branch_rejected() {
        let config = Config::default().apply(Overrides {
            homologation_branch: Some("*".to_string()),
            ..Overrides::default()
        });
        assert!(matches!(config.policy.to_policy(), Err(GateError::Config(_))));
    }
}
