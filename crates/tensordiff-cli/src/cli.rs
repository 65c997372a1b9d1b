use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tensordiff",
    about = "Semantic diff for AI/ML model artifacts and structured records",
    version,
)]
pub struct Cli {
    /// Old file or directory
    pub old: PathBuf,

    /// New file or directory
    pub new: PathBuf,

    /// Numeric tolerance: numbers within epsilon compare equal
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Only report changes at or under this path (e.g. "layers[0].weight")
    #[arg(long = "path")]
    pub path_filter: Option<String>,

    /// Skip mapping keys matching this regular expression
    #[arg(long)]
    pub ignore_keys_regex: Option<String>,

    /// Output format: diffai, json, or yaml
    #[arg(short, long, default_value = "diffai")]
    pub output: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub verbose: bool,
}
