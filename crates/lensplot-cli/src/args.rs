//! Command-line argument definitions for the Lensplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the output format and engine, the emphasized set, and logging
//! verbosity.

use std::fmt;

use clap::{Parser, ValueEnum};

use lensplot::{LayoutEngine, emphasis::Focus};

/// Output formats the CLI can write.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Static SVG document with tooltips
    #[default]
    Svg,
    /// The computed diagram as JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Svg => write!(f, "svg"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Command-line arguments for the Lensplot diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON counts file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Placement engine (heuristic, refined); overrides the configuration
    #[arg(short, long)]
    pub engine: Option<LayoutEngine>,

    /// Render the diagram with this set selected
    #[arg(long, conflicts_with = "hover")]
    pub select: Option<String>,

    /// Render the diagram with this set hovered
    #[arg(long)]
    pub hover: Option<String>,
}

impl Args {
    /// The emphasized set, if any.
    pub fn focus(&self) -> Option<Focus> {
        match (&self.select, &self.hover) {
            (Some(name), _) => Some(Focus::Selected(name.clone())),
            (None, Some(name)) => Some(Focus::Hovered(name.clone())),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["lensplot", "counts.json"]);

        assert_eq!(args.output, "out.svg");
        assert_eq!(args.format, OutputFormat::Svg);
        assert!(args.engine.is_none());
        assert!(args.focus().is_none());
    }

    #[test]
    fn test_engine_and_focus() {
        let args = Args::parse_from([
            "lensplot",
            "counts.json",
            "--engine",
            "refined",
            "--format",
            "json",
            "--hover",
            "Segment 1",
        ]);

        assert_eq!(args.engine, Some(LayoutEngine::Refined));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.focus(), Some(Focus::Hovered("Segment 1".to_string())));
    }

    #[test]
    fn test_select_conflicts_with_hover() {
        let result =
            Args::try_parse_from(["lensplot", "in.json", "--select", "A", "--hover", "B"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        assert!(Args::try_parse_from(["lensplot", "in.json", "--engine", "force"]).is_err());
    }
}
