//! Orchestration: evaluate the policy, publish the status comment, and map
//! the verdict onto the process exit status.

use colored::Colorize;

use crate::cli::Args;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::{self, CommentApi, GhCli};
use crate::jira::{IssueTracker, JiraClient};
use crate::policy;
use crate::template;

/// Main application entry point
pub fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;
    let jira = JiraClient::new(&config.jira_base_url)?;
    let github = GhCli::new(config.repo.clone(), config.pr_number);

    match check(&config, &jira, &github) {
        Ok(()) => {
            println!("{} Jira issue check passed.", ">".bright_green());
            Ok(())
        }
        // The tailored comment for the violation is already on the PR.
        Err(Error::PolicyViolation(message)) => Err(Error::PolicyViolation(message)),
        Err(err) => {
            // Best effort; the run fails with the original error either way.
            if let Err(publish_err) = publish(&config, &github, &template::generic_error()) {
                eprintln!(
                    "{} Could not publish the error comment: {}",
                    "x".red(),
                    publish_err
                );
            }
            Err(err)
        }
    }
}

/// Evaluate the policy, publish the resulting comment, and fail the run when
/// the verdict says so. The comment is published before the verdict is
/// applied: a run missing RCB approvals still gets its issue listing.
fn check(config: &Config, tracker: &dyn IssueTracker, comments: &dyn CommentApi) -> Result<()> {
    let outcome = policy::evaluate(tracker, config)?;

    let body = template::render(&outcome, config);
    publish(config, comments, &body)?;

    match outcome.verdict() {
        None => Ok(()),
        Some(message) => Err(Error::PolicyViolation(message)),
    }
}

fn publish(config: &Config, comments: &dyn CommentApi, body: &str) -> Result<()> {
    if config.dry_run {
        println!("{}", body);
        return Ok(());
    }

    github::upsert_comment(comments, body)
}
