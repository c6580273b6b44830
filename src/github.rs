//! GitHub comment publishing for jira-guard
//!
//! Drives the GitHub CLI (preinstalled on GitHub-hosted runners and
//! authenticated through `GH_TOKEN`/`GITHUB_TOKEN`) against the REST
//! issue-comment API: list, create and update.

use std::process::Command;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::template::COMMENT_HEADER;

/// An issue comment as returned by the REST API, reduced to what the
/// publisher needs.
#[derive(Deserialize, Debug, Clone)]
pub struct Comment {
    pub id: u64,
    pub body: String,
}

/// The comment operations on the current pull request, seamed out so the
/// publisher can be tested against an in-memory fake.
pub trait CommentApi {
    /// List comments in the API's listing order.
    fn list_comments(&self) -> Result<Vec<Comment>>;
    fn create_comment(&self, body: &str) -> Result<()>;
    fn update_comment(&self, id: u64, body: &str) -> Result<()>;
}

/// Ensure the pull request carries exactly one status comment: find the
/// first listed comment whose body starts with the fixed header and replace
/// its entire body, or create one. One list plus one write per run; runs on
/// the same PR are not coordinated, so the last writer wins.
pub fn upsert_comment(api: &dyn CommentApi, body: &str) -> Result<()> {
    let full_body = format!("{}\n\n{}", COMMENT_HEADER, body);

    let existing = api.list_comments()?;
    match existing.iter().find(|c| c.body.starts_with(COMMENT_HEADER)) {
        Some(comment) => api.update_comment(comment.id, &full_body),
        None => api.create_comment(&full_body),
    }
}

/// Comment API implementation backed by `gh api`.
pub struct GhCli {
    repo: String,
    pr_number: u64,
}

impl GhCli {
    pub fn new(repo: impl Into<String>, pr_number: u64) -> Self {
        Self {
            repo: repo.into(),
            pr_number,
        }
    }

    fn comments_path(&self) -> String {
        format!("repos/{}/issues/{}/comments", self.repo, self.pr_number)
    }

    fn run(args: &[&str]) -> Result<Vec<u8>> {
        let output = Command::new("gh")
            .args(args)
            .output()
            .map_err(|e| Error::GitHubCli(format!("Failed to execute gh command: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::GitHubCli(stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }
}

impl CommentApi for GhCli {
    fn list_comments(&self) -> Result<Vec<Comment>> {
        let path = format!("{}?per_page=100", self.comments_path());
        let stdout = Self::run(&["api", &path])?;

        Ok(serde_json::from_slice(&stdout)?)
    }

    fn create_comment(&self, body: &str) -> Result<()> {
        let path = self.comments_path();
        let body_field = format!("body={}", body);
        Self::run(&["api", "--method", "POST", &path, "-f", &body_field, "--silent"])?;

        Ok(())
    }

    fn update_comment(&self, id: u64, body: &str) -> Result<()> {
        let path = format!("repos/{}/issues/comments/{}", self.repo, id);
        let body_field = format!("body={}", body);
        Self::run(&["api", "--method", "PATCH", &path, "-f", &body_field, "--silent"])?;

        Ok(())
    }
}
