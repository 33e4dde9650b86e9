use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Explore the dependency tree of an npm package
#[derive(Parser, Debug)]
#[command(name = "npm-deptree")]
#[command(disable_version_flag = true)]
#[command(
    about = "Build the dependency tree of an npm package and render it as ASCII or Graphviz DOT",
    long_about = None
)]
pub struct Args {
    /// Name of the root package (e.g. express, @babel/core)
    #[arg(short, long)]
    pub package: String,

    /// Registry base URL; in test mode, the fixture file to read instead
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Read package metadata from the fixture file given by --repo
    #[arg(long, value_name = "true|false", action = ArgAction::Set, default_value_t = false)]
    pub test_mode: bool,

    /// Version or dist-tag of the root package [default: latest]
    #[arg(short = 'V', long)]
    pub version: Option<String>,

    /// Write the Graphviz DOT graph to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the tree as ASCII text on stdout
    #[arg(long, value_name = "true|false")]
    pub ascii_tree: Option<bool>,

    /// Maximum depth below the root to expand [default: 10]
    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    /// Path to a config file (defaults to ./deptree.config.yml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the dependencies-first install order after the tree
    #[arg(long)]
    pub load_order: bool,

    /// Maximum number of registry requests in flight [default: 8]
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
