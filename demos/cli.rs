//! Command-line interface for marker_scan
//!
//! Processes a list of photographs, printing a JSON report summary per
//! image on stdout and progress on stderr. A failed image is reported and
//! skipped; the batch always runs to completion.

use marker_scan::{analyze_marker_with_config, MarkerReport, PipelineConfig};
use std::{env, path::PathBuf, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut image_paths: Vec<PathBuf> = Vec::new();
    let mut collecting_list = false;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-l" | "--list" => {
                collecting_list = true;
            }
            "--config" => {
                collecting_list = false;
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with('-') && collecting_list => {
                image_paths.push(PathBuf::from(arg));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if image_paths.is_empty() {
        print_help(&args[0]);
        process::exit(1);
    }

    let config = match config_path {
        Some(path) => match PipelineConfig::from_json_file(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config file: {}", e);
                process::exit(1);
            }
        },
        None => PipelineConfig::default(),
    };

    eprintln!("Processing {} image(s)...", image_paths.len());

    let mut error_count = 0;
    for (index, path) in image_paths.iter().enumerate() {
        eprint!("[{}/{}] {} ... ", index + 1, image_paths.len(), path.display());
        match analyze_marker_with_config(path, &config) {
            Ok(report) => {
                eprintln!("✓");
                print_report(&report);
            }
            Err(error) => {
                eprintln!("✗ {}", error);
                eprintln!("  Suggestion: {}", error.user_message());
                error_count += 1;
            }
        }
    }

    eprintln!();
    eprintln!("Done: {} succeeded, {} failed", image_paths.len() - error_count, error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} -l <image_path>... [--config config.json]", program_name);
    eprintln!();
    eprintln!("Locate the marker-colored object in each photograph and report");
    eprintln!("its bounding box and color statistics.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -l, --list <paths>   One or more image files to process (required)");
    eprintln!("  --config <file>      JSON pipeline configuration (default: built-in)");
    eprintln!("  --help, -h           Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} -l photo.jpg", program_name);
    eprintln!("  {} -l a.jpg b.jpg c.jpg --config range.json", program_name);
}

fn print_report(report: &MarkerReport) {
    // JSON to stdout for programmatic use
    match serde_json::to_string_pretty(&report.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }

    // Summary to stderr for human reading
    let bb = report.bounding_box;
    eprintln!(
        "  Region: {}x{} at ({}, {})",
        bb.width, bb.height, bb.x, bb.y
    );
    let [m0, m1, m2] = report.statistics.means;
    match report.statistics.space {
        marker_scan::StatisticsSpace::Hsv => {
            eprintln!("  Mean HSV: h={:.1} s={:.1} v={:.1}", m0, m1, m2)
        }
        marker_scan::StatisticsSpace::Rgb => {
            eprintln!("  Mean RGB: r={:.1} g={:.1} b={:.1}", m0, m1, m2)
        }
    }
}
