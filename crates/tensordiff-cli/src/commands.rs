use colored::Colorize;
use tensordiff::{diff_paths, format_output, render_line, DiffEntry, DiffOptions, OutputFormat};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut options = DiffOptions::new().with_epsilon(cli.epsilon)?;
    if let Some(filter) = &cli.path_filter {
        options = options.with_path_filter(filter.clone());
    }
    if let Some(pattern) = &cli.ignore_keys_regex {
        options = options.with_ignore_keys(pattern)?;
    }
    let format = OutputFormat::parse_format(&cli.output)?;

    let entries = diff_paths(&cli.old, &cli.new, &options)?;
    tracing::debug!(entries = entries.len(), "comparison finished");

    match format {
        OutputFormat::Diffai => {
            for entry in &entries {
                println!("{}", colorized_line(entry));
            }
        }
        _ => println!("{}", format_output(&entries, format)?),
    }
    Ok(())
}

fn colorized_line(entry: &DiffEntry) -> String {
    let line = render_line(entry);
    match entry {
        DiffEntry::Added { .. } => line.green().to_string(),
        DiffEntry::Removed { .. } => line.red().to_string(),
        DiffEntry::Modified { .. } => line.yellow().to_string(),
        DiffEntry::TypeChanged { .. } => line.cyan().to_string(),
    }
}
