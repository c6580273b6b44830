use clap::Parser;

/// Command-line inputs, all with environment fallbacks so the tool can be
/// dropped into a CI step without argument plumbing.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Pull request title to check
    #[clap(long, env = "PR_TITLE")]
    pub title: String,

    /// Base branch ref the pull request targets (e.g. "patch/2.40")
    #[clap(long, env = "PR_BASE_REF")]
    pub base_ref: String,

    /// Pull request number
    #[clap(long, env = "PR_NUMBER")]
    pub pr_number: u64,

    /// Repository slug in "owner/name" form
    #[clap(long, env = "GITHUB_REPOSITORY")]
    pub repo: String,

    /// Base URL of the Jira instance (e.g. "https://jira.dhis2.org")
    #[clap(long, env = "JIRA_URL")]
    pub jira_url: String,

    /// Print the rendered comment instead of posting it
    #[clap(long, value_parser, default_value_t = false)]
    pub dry_run: bool,
}
