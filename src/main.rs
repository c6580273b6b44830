use std::process;

use clap::Parser;
use colored::Colorize;

use jira_guard::app;
use jira_guard::cli::Args;

fn main() {
    let args = Args::parse();

    if let Err(err) = app::run(args) {
        eprintln!("{} {}", "x".red(), err);
        process::exit(1);
    }
}
