//! Output formats and their rendering.

use std::fmt;
use std::str::FromStr;

use tensordiff_engine::DiffEntry;
use tensordiff_types::{ConfigError, Value};

/// A supported output representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable line per entry.
    #[default]
    Diffai,
    /// JSON array of entry objects. The wire contract.
    Json,
    /// Same entry shape rendered as YAML.
    Yaml,
}

impl OutputFormat {
    /// Parse a format name, case-insensitively.
    pub fn parse_format(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "diffai" => Ok(OutputFormat::Diffai),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(ConfigError::UnknownFormat(name.to_string())),
        }
    }

    /// The canonical name of this format.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Diffai => "diffai",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::parse_format(name)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render an entry list in the requested format.
pub fn format_output(entries: &[DiffEntry], format: OutputFormat) -> Result<String, ConfigError> {
    match format {
        OutputFormat::Diffai => Ok(render_diffai(entries)),
        OutputFormat::Json => {
            serde_json::to_string(entries).map_err(|e| ConfigError::Render(e.to_string()))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(entries).map_err(|e| ConfigError::Render(e.to_string()))
        }
    }
}

/// The fixed human-readable grammar, one line per entry:
///
/// ```text
/// Modified a.b: 1.0 -> 2.0
/// TypeChanged c: [1.0] -> "x"
/// Added d: true
/// Removed e: null
/// ```
fn render_diffai(entries: &[DiffEntry]) -> String {
    let lines: Vec<String> = entries.iter().map(render_line).collect();
    lines.join("\n")
}

/// One grammar line. Public so the CLI can colorize per entry kind without
/// re-implementing the notation.
pub fn render_line(entry: &DiffEntry) -> String {
    match entry {
        DiffEntry::Added { path, new_value } => {
            format!("Added {path}: {}", render_value(new_value))
        }
        DiffEntry::Removed { path, old_value } => {
            format!("Removed {path}: {}", render_value(old_value))
        }
        DiffEntry::Modified {
            path,
            old_value,
            new_value,
        } => format!(
            "Modified {path}: {} -> {}",
            render_value(old_value),
            render_value(new_value)
        ),
        DiffEntry::TypeChanged {
            path,
            old_value,
            new_value,
        } => format!(
            "TypeChanged {path}: {} -> {}",
            render_value(old_value),
            render_value(new_value)
        ),
    }
}

fn render_value(value: &Value) -> String {
    value.to_string()
}
