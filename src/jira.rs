//! Jira integration for jira-guard
//!
//! Two read-only queries against the Jira REST API:
//! - listing the project keys that are valid on the instance (used to build
//!   the issue-key extraction pattern)
//! - fetching a single issue with its summary and labels
//!
//! Lookups are sequential; each run performs one project listing plus one
//! issue fetch per key referenced in the title.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};

/// A Jira issue, reduced to the fields the policy needs.
#[derive(Deserialize, Debug, Clone)]
pub struct JiraIssue {
    /// The issue key (e.g. "DHIS2-12345")
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Deserialize, Debug, Clone)]
pub struct IssueFields {
    /// The issue title
    pub summary: String,
    /// Labels attached to the issue; RCB approvals live here
    #[serde(default)]
    pub labels: Vec<String>,
}

#[derive(Deserialize)]
struct Project {
    key: String,
}

/// Read-only view of the issue tracker, seamed out so the evaluator can be
/// tested against an in-memory fake.
pub trait IssueTracker {
    /// List the project keys that exist on the instance, in response order.
    fn project_keys(&self) -> Result<Vec<String>>;

    /// Fetch an issue by key. `None` means the key does not exist.
    fn fetch_issue(&self, key: &str) -> Result<Option<JiraIssue>>;
}

/// HTTP client against a live Jira instance.
pub struct JiraClient {
    client: Client,
    base_url: String,
}

impl JiraClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jira-guard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl IssueTracker for JiraClient {
    fn project_keys(&self) -> Result<Vec<String>> {
        let url = format!("{}/rest/api/2/project", self.base_url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::JiraResponse(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let projects: Vec<Project> = response.json()?;
        Ok(projects.into_iter().map(|project| project.key).collect())
    }

    fn fetch_issue(&self, key: &str) -> Result<Option<JiraIssue>> {
        let url = format!(
            "{}/rest/api/2/issue/{}?fields=summary,labels",
            self.base_url, key
        );

        let response = self.client.get(&url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::JiraResponse(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        Ok(Some(response.json()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_deserializes_from_rest_payload() {
        let payload = r#"{
            "key": "DHIS2-12345",
            "fields": {
                "summary": "NPE when saving org unit",
                "labels": ["APPROVED-2.40", "regression"]
            }
        }"#;

        let issue: JiraIssue = serde_json::from_str(payload).unwrap();
        assert_eq!(issue.key, "DHIS2-12345");
        assert_eq!(issue.fields.summary, "NPE when saving org unit");
        assert_eq!(issue.fields.labels, vec!["APPROVED-2.40", "regression"]);
    }

    #[test]
    fn test_issue_without_labels_defaults_to_empty() {
        let payload = r#"{"key": "LIBS-1", "fields": {"summary": "Bump deps"}}"#;

        let issue: JiraIssue = serde_json::from_str(payload).unwrap();
        assert!(issue.fields.labels.is_empty());
    }

    #[test]
    fn test_project_list_keeps_response_order() {
        let payload = r#"[
            {"key": "DHIS2", "name": "DHIS 2", "id": "10000"},
            {"key": "LIBS", "name": "Libraries", "id": "10100"},
            {"key": "ANDROAPP", "name": "Android App", "id": "10200"}
        ]"#;

        let projects: Vec<Project> = serde_json::from_str(payload).unwrap();
        let keys: Vec<String> = projects.into_iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["DHIS2", "LIBS", "ANDROAPP"]);
    }
}
