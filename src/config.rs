//! Run configuration for jira-guard
//!
//! Everything the check needs is fixed at invocation time and collected into
//! a single immutable [`Config`] that is passed explicitly to the evaluator
//! and publisher. Nothing reads ambient state after this point, which keeps
//! the rest of the crate testable with synthetic configs.

use crate::cli::Args;
use crate::error::{Error, Result};

/// Immutable context for one check run.
#[derive(Debug, Clone)]
pub struct Config {
    /// The pull request title under inspection
    pub title: String,
    /// The base branch ref the pull request targets
    pub base_ref: String,
    /// The pull request number on GitHub
    pub pr_number: u64,
    /// Repository slug ("owner/name")
    pub repo: String,
    /// Jira base URL without a trailing slash
    pub jira_base_url: String,
    /// Print the comment instead of posting it
    pub dry_run: bool,
}

impl Config {
    /// Build the run configuration from parsed CLI arguments.
    pub fn from_args(args: Args) -> Result<Self> {
        let repo = args.repo.trim().to_string();
        if !is_repo_slug(&repo) {
            return Err(Error::Config(format!(
                "expected repository slug in \"owner/name\" form, got {:?}",
                repo
            )));
        }

        Ok(Self {
            title: args.title,
            base_ref: args.base_ref,
            pr_number: args.pr_number,
            repo,
            jira_base_url: args.jira_url.trim_end_matches('/').to_string(),
            dry_run: args.dry_run,
        })
    }

    /// Browse link for an issue key (e.g. `https://jira.dhis2.org/browse/DHIS2-123`).
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.jira_base_url, key)
    }
}

fn is_repo_slug(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty() && !name.is_empty() && !name.contains('/')
        }
        None => false,
    }
}
