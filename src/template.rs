//! Status comment rendering
//!
//! One rendered body per [`Outcome`], plus the fixed header the publisher
//! keys on to keep a single status comment per pull request. The bodies here
//! are the user-facing contract of the check; tests pin the exact line
//! formats.

use crate::config::Config;
use crate::policy::{EvaluationResult, Outcome, APPROVAL_LABEL_PREFIX, ESCAPE_HATCH};

/// Fixed first line identifying the status comment managed by this tool.
pub const COMMENT_HEADER: &str = "## Jira issue check";

/// Render the comment body for an outcome. The header is added by the
/// publisher, not here.
pub fn render(outcome: &Outcome, config: &Config) -> String {
    match outcome {
        Outcome::MissingIssueKey => missing_key(),
        Outcome::EscapeHatch => escape_hatch_info(),
        Outcome::EscapeHatchOnProtectedBranch(version) => escape_hatch_violation(version),
        Outcome::NoValidIssues(result) => no_valid_issues(result),
        Outcome::Evaluated(result) => report(result, config),
    }
}

/// Body posted when the run aborts on an unexpected error.
pub fn generic_error() -> String {
    "🚨 Something went wrong while checking this pull request against Jira. \
     This is not a problem with your PR; re-run the check or contact the maintainers."
        .to_string()
}

fn missing_key() -> String {
    format!(
        "❌ No Jira issue key was found in the pull request title.\n\n\
         Reference at least one issue as `[<PROJECT>-<number>]` (for example \
         `[DHIS2-12345]`), or add `{}` to the title if no issue applies.",
        ESCAPE_HATCH
    )
}

fn escape_hatch_info() -> String {
    format!(
        "ℹ️ This pull request is marked `{}`, so no Jira issue is linked. \
         Skipping further checks.",
        ESCAPE_HATCH
    )
}

fn escape_hatch_violation(version: &str) -> String {
    format!(
        "❌ `{}` cannot be used for pull requests targeting the protected \
         release branch for {}.\n\n\
         Reference a Jira issue carrying the `{}{}` label instead.",
        ESCAPE_HATCH, version, APPROVAL_LABEL_PREFIX, version
    )
}

fn invalid_key_line(key: &str) -> String {
    format!("- ❓ Issue key `{}` appears to be invalid", key)
}

fn no_valid_issues(result: &EvaluationResult) -> String {
    let mut lines = vec![
        "❌ None of the issue keys referenced in the pull request title could be \
         found in Jira:"
            .to_string(),
        String::new(),
    ];
    lines.extend(result.invalid_keys.iter().map(|key| invalid_key_line(key)));
    lines.push(String::new());
    lines.push("Double-check the keys in the title.".to_string());

    lines.join("\n")
}

fn report(result: &EvaluationResult, config: &Config) -> String {
    let mut lines = vec!["This pull request references:".to_string(), String::new()];

    for issue in &result.valid_issues {
        lines.push(format!(
            "- [{}]({}) - {}",
            issue.key,
            config.browse_url(&issue.key),
            issue.fields.summary
        ));
    }
    lines.extend(result.invalid_keys.iter().map(|key| invalid_key_line(key)));

    if let Some(banner) = approval_banner(result) {
        lines.push(String::new());
        lines.push(banner);
    }

    lines.join("\n")
}

/// Exactly one of three cases: approval still needed, approved, or no banner
/// when the base branch does not require approval.
fn approval_banner(result: &EvaluationResult) -> Option<String> {
    let version = result.approval_target.as_deref()?;
    let label = format!("{}{}", APPROVAL_LABEL_PREFIX, version);

    if result.missing_approval_keys.is_empty() {
        Some(format!(
            "✅ RCB approval confirmed: every referenced issue carries the `{}` label.",
            label
        ))
    } else {
        Some(format!(
            "⚠️ This pull request targets a protected release branch, but the \
             following issue(s) are missing the `{}` label: {}. It cannot be \
             merged until the Release Control Board approves them.",
            label,
            result.missing_approval_keys.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use crate::jira::{IssueFields, JiraIssue};

    fn config() -> Config {
        Config::from_args(Args {
            title: String::new(),
            base_ref: "master".to_string(),
            pr_number: 7,
            repo: "dhis2/dhis2-core".to_string(),
            jira_url: "https://jira.dhis2.org".to_string(),
            dry_run: true,
        })
        .unwrap()
    }

    fn issue(key: &str, summary: &str) -> JiraIssue {
        JiraIssue {
            key: key.to_string(),
            fields: IssueFields {
                summary: summary.to_string(),
                labels: vec![],
            },
        }
    }

    #[test]
    fn test_issue_line_format() {
        let result = EvaluationResult {
            valid_issues: vec![issue("DHIS2-1", "Fix login")],
            ..Default::default()
        };

        let body = report(&result, &config());
        assert!(body.contains("- [DHIS2-1](https://jira.dhis2.org/browse/DHIS2-1) - Fix login"));
        // no approval requirement, no banner
        assert!(!body.contains("RCB"));
    }

    #[test]
    fn test_invalid_key_line_format() {
        assert_eq!(
            invalid_key_line("DHIS2-9999"),
            "- ❓ Issue key `DHIS2-9999` appears to be invalid"
        );
    }

    #[test]
    fn test_report_lists_issues_then_warnings_then_banner() {
        let result = EvaluationResult {
            valid_issues: vec![issue("DHIS2-1", "Fix login")],
            invalid_keys: vec!["DHIS2-9999".to_string()],
            missing_approval_keys: vec!["DHIS2-1".to_string()],
            requires_approval: true,
            approval_target: Some("2.40".to_string()),
        };

        let body = report(&result, &config());
        let issue_at = body.find("- [DHIS2-1]").unwrap();
        let warning_at = body.find("- ❓ Issue key `DHIS2-9999`").unwrap();
        let banner_at = body.find("missing the `APPROVED-2.40` label").unwrap();
        assert!(issue_at < warning_at);
        assert!(warning_at < banner_at);
    }

    #[test]
    fn test_approved_banner_when_nothing_is_missing() {
        let result = EvaluationResult {
            valid_issues: vec![issue("DHIS2-1", "Fix login")],
            requires_approval: true,
            approval_target: Some("2.40".to_string()),
            ..Default::default()
        };

        let body = report(&result, &config());
        assert!(body.contains("✅ RCB approval confirmed"));
        assert!(body.contains("`APPROVED-2.40`"));
    }

    #[test]
    fn test_escape_hatch_templates_name_the_marker() {
        assert!(escape_hatch_info().contains("`[NO-JIRA]`"));
        assert!(escape_hatch_violation("2.40").contains("`APPROVED-2.40`"));
        assert!(missing_key().contains("`[NO-JIRA]`"));
    }
}
