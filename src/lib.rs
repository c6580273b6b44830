//! # jira-guard
//!
//! CI check that links pull requests to Jira issues and, for protected
//! release branches, to RCB approval labels on those issues. It extracts
//! issue keys from the PR title, validates them against Jira, and keeps a
//! single status comment on the PR up to date with the outcome.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod jira;
pub mod policy;
pub mod template;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
