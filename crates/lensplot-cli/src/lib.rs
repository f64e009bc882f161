//! CLI logic for the Lensplot diagram tool.
//!
//! This module contains the core CLI logic: reading a JSON counts file,
//! running it through the Lensplot pipeline and writing SVG or JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};
use miette::{Diagnostic as _, Severity};

use lensplot::{DiagramBuilder, LensplotError};

use error_adapter::{Reportable, diagnostics_to_reportables, render};

/// Run the Lensplot CLI application
///
/// This function processes the input file through the Lensplot pipeline
/// and writes the result to the output file. Reconciliation diagnostics are
/// logged and never stop the run.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `LensplotError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input that is not valid JSON counts
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), LensplotError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing counts"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.engine {
        app_config.layout_mut().set_engine(engine);
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process counts using DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let input = builder.parse(&source)?;
    let reconciled = builder.reconcile(&input);
    report_diagnostics(&diagnostics_to_reportables(reconciled.diagnostics(), &source));

    let diagram = builder.layout(&reconciled);
    let output = match args.format {
        OutputFormat::Svg => {
            let emphasis = builder.emphasize(&reconciled, args.focus());
            builder.render_svg(&diagram, &reconciled, &emphasis)?
        }
        OutputFormat::Json => builder.render_json(&diagram)?,
    };

    // Write output file
    fs::write(&args.output, output)?;

    info!(output_file = args.output, format:% = args.format; "Diagram exported successfully");

    Ok(())
}

fn report_diagnostics(reportables: &[Reportable<'_>]) {
    for reportable in reportables {
        let rendered = render(reportable);
        match reportable.severity() {
            Some(Severity::Warning) => warn!("{rendered}"),
            _ => info!("{rendered}"),
        }
    }
}
