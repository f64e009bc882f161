use std::{fs, path::PathBuf};

use tempfile::tempdir;

use lensplot_cli::{Args, OutputFormat, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos are at workspace root, relative to workspace not the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &PathBuf, output: PathBuf, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        format,
        engine: None,
        select: None,
        hover: None,
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_json_files(demos_path());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        for format in [OutputFormat::Svg, OutputFormat::Json] {
            let output_path = temp_dir.path().join(format!("{stem}.{format}"));

            if let Err(e) = run(&args(demo_path, output_path.clone(), format)) {
                failed_demos.push((demo_path.clone(), e));
                continue;
            }

            let written = fs::read_to_string(&output_path).expect("output written");
            assert!(!written.is_empty(), "{} produced no output", demo_path.display());
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_filename = format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        if run(&args(demo_path, output_path, OutputFormat::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_selection_and_engine_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_path().join("nested.json");
    let output_path = temp_dir.path().join("nested.svg");

    let mut args = args(&demo, output_path.clone(), OutputFormat::Svg);
    args.engine = Some(lensplot::LayoutEngine::Refined);
    args.select = Some("Segment 1".to_string());

    run(&args).expect("nested demo renders");

    let svg = fs::read_to_string(&output_path).expect("output written");
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains("ALL USERS"));
}
