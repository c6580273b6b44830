//! Pull request policy evaluation
//!
//! Extracts Jira issue keys from the PR title, validates each one against the
//! tracker, and checks RCB approval labels when the PR targets a protected
//! release branch. Everything except [`evaluate`] is a pure function of its
//! inputs so the parsing and classification logic is testable offline.

use regex::Regex;

use crate::config::Config;
use crate::error::Result;
use crate::jira::{IssueTracker, JiraIssue};

/// Base branches starting with this prefix require RCB approval.
pub const PROTECTED_BRANCH_PREFIX: &str = "patch/";

/// Literal a PR author puts in the title to declare that no Jira issue applies.
pub const ESCAPE_HATCH: &str = "[NO-JIRA]";

/// Prefix of the Jira label that records an RCB approval for a release.
pub const APPROVAL_LABEL_PREFIX: &str = "APPROVED-";

/// Returns the release version that needs approval, iff the base ref names a
/// protected release branch ("patch/2.40" -> "2.40").
pub fn approval_target(base_ref: &str) -> Option<&str> {
    base_ref.strip_prefix(PROTECTED_BRANCH_PREFIX)
}

/// True when the title carries the escape-hatch marker.
pub fn has_escape_hatch(title: &str) -> bool {
    title.contains(ESCAPE_HATCH)
}

/// Build the case-sensitive pattern matching `[<KEY>-<digits>]` for any of
/// the given project keys. `None` when there are no keys to match against.
pub fn build_key_pattern(project_keys: &[String]) -> Option<Regex> {
    if project_keys.is_empty() {
        return None;
    }

    let alternation = project_keys
        .iter()
        .map(|key| regex::escape(key))
        .collect::<Vec<_>>()
        .join("|");

    // Escaped keys joined by `|` always form a valid pattern.
    Some(Regex::new(&format!(r"\[((?:{})-[0-9]+)\]", alternation)).unwrap())
}

/// Extract issue keys from a title, left to right, brackets stripped.
/// Duplicates are kept; unknown project prefixes never match.
pub fn extract_issue_keys(project_keys: &[String], title: &str) -> Vec<String> {
    let Some(pattern) = build_key_pattern(project_keys) else {
        return Vec::new();
    };

    pattern
        .captures_iter(title)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// What the evaluator found for a title that referenced at least one key.
///
/// `valid_issues` and `invalid_keys` together partition the extracted keys:
/// every key ends up in exactly one of the two.
#[derive(Debug, Default)]
pub struct EvaluationResult {
    pub valid_issues: Vec<JiraIssue>,
    pub invalid_keys: Vec<String>,
    pub missing_approval_keys: Vec<String>,
    pub requires_approval: bool,
    pub approval_target: Option<String>,
}

/// Classification of one run, driving both the comment and the exit status.
#[derive(Debug)]
pub enum Outcome {
    /// No issue key and no escape hatch in the title
    MissingIssueKey,
    /// Escape hatch used on a branch that does not require approval
    EscapeHatch,
    /// Escape hatch used on a protected release branch (carries the version)
    EscapeHatchOnProtectedBranch(String),
    /// Keys were referenced but none of them exist in the tracker
    NoValidIssues(EvaluationResult),
    /// At least one referenced issue exists; approvals may still be missing
    Evaluated(EvaluationResult),
}

impl Outcome {
    /// `None` when the check passes, `Some(message)` when it must fail.
    ///
    /// An `Evaluated` outcome fails only on missing approvals; the comment
    /// posted for it still lists the issues (inform and block are
    /// independent outputs).
    pub fn verdict(&self) -> Option<String> {
        match self {
            Outcome::MissingIssueKey => {
                Some("no Jira issue key found in the PR title".to_string())
            }
            Outcome::EscapeHatch => None,
            Outcome::EscapeHatchOnProtectedBranch(version) => Some(format!(
                "{} is not allowed on the protected release branch for {}",
                ESCAPE_HATCH, version
            )),
            Outcome::NoValidIssues(result) => Some(format!(
                "no valid Jira issue referenced; invalid key(s): {}",
                result.invalid_keys.join(", ")
            )),
            Outcome::Evaluated(result) => {
                if result.missing_approval_keys.is_empty() {
                    None
                } else {
                    Some(format!(
                        "missing RCB approval for: {}",
                        result.missing_approval_keys.join(", ")
                    ))
                }
            }
        }
    }
}

/// Run the whole policy for one pull request.
///
/// Issue lookups are sequential, one per extracted key, and any lookup error
/// aborts the run (no per-key retries).
pub fn evaluate(tracker: &dyn IssueTracker, config: &Config) -> Result<Outcome> {
    let target = approval_target(&config.base_ref).map(str::to_string);

    let project_keys = tracker.project_keys()?;
    let keys = extract_issue_keys(&project_keys, &config.title);

    if keys.is_empty() {
        if has_escape_hatch(&config.title) {
            return Ok(match target {
                Some(version) => Outcome::EscapeHatchOnProtectedBranch(version),
                None => Outcome::EscapeHatch,
            });
        }
        return Ok(Outcome::MissingIssueKey);
    }

    // Keys are present: the escape hatch text, even if present, is irrelevant.
    let mut result = EvaluationResult {
        requires_approval: target.is_some(),
        approval_target: target.clone(),
        ..Default::default()
    };

    for key in &keys {
        match tracker.fetch_issue(key)? {
            Some(issue) => {
                if let Some(version) = &target {
                    let label = format!("{}{}", APPROVAL_LABEL_PREFIX, version);
                    if !issue.fields.labels.iter().any(|l| l == &label) {
                        result.missing_approval_keys.push(key.clone());
                    }
                }
                result.valid_issues.push(issue);
            }
            None => result.invalid_keys.push(key.clone()),
        }
    }

    if result.valid_issues.is_empty() && !result.invalid_keys.is_empty() {
        return Ok(Outcome::NoValidIssues(result));
    }

    Ok(Outcome::Evaluated(result))
}
