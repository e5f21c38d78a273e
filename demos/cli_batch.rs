//! Batch CLI for marker_scan with JSON configuration
//!
//! Processes all images in a directory using a JSON configuration file.

use marker_scan::{analyze_marker_with_config, image_loader, PipelineConfig};
use std::{env, fs, path::{Path, PathBuf}, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        print_help(&args[0]);
        process::exit(1);
    }

    let config_path = Path::new(&args[1]);
    let input_path = Path::new(&args[2]);

    if !config_path.exists() {
        eprintln!("Error: Config file '{}' does not exist", config_path.display());
        process::exit(1);
    }

    // Load configuration
    let config = match PipelineConfig::from_json_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    eprintln!("Loaded configuration from {}", config_path.display());
    eprintln!("Input path: {}", input_path.display());
    eprintln!();

    // Find all image files in input directory
    let image_files = match find_image_files(input_path) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error finding image files: {}", e);
            process::exit(1);
        }
    };

    if image_files.is_empty() {
        eprintln!("No image files found in {}", input_path.display());
        process::exit(1);
    }

    eprintln!("Found {} image files to process", image_files.len());
    eprintln!();

    // Process each image
    let mut success_count = 0;
    let mut error_count = 0;

    for (i, image_path) in image_files.iter().enumerate() {
        let filename = image_path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");

        eprint!("[{}/{}] Processing {}... ", i + 1, image_files.len(), filename);

        match analyze_marker_with_config(image_path, &config) {
            Ok(report) => {
                eprintln!("✓");
                success_count += 1;

                match serde_json::to_string(&report.summary()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Warning serializing report: {}", e),
                }

                if env::var("VERBOSE").is_ok() {
                    let [m0, m1, m2] = report.statistics.means;
                    eprintln!(
                        "  → box {}x{} at ({}, {}), means [{:.1}, {:.1}, {:.1}]",
                        report.bounding_box.width,
                        report.bounding_box.height,
                        report.bounding_box.x,
                        report.bounding_box.y,
                        m0, m1, m2
                    );
                }
            }
            Err(error) => {
                eprintln!("✗ {}", error);
                error_count += 1;
            }
        }
    }

    eprintln!();
    eprintln!("Batch processing complete:");
    eprintln!("  Success: {}", success_count);
    eprintln!("  Errors: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} <config.json> <image_dir_or_file>", program_name);
    eprintln!();
    eprintln!("Batch process photographs using a JSON pipeline configuration.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  config.json          JSON file containing pipeline configuration");
    eprintln!("  image_dir_or_file    Directory to scan for images, or a single file");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VERBOSE=1            Print detailed results for each image");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} range.json photos/", program_name);
    eprintln!("  VERBOSE=1 {} range.json photo.jpg", program_name);
}

fn find_image_files(dir: &Path) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if dir.is_file() {
        // Single file provided
        files.push(dir.to_path_buf());
        return Ok(files);
    }

    // Directory provided - scan for image files
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() {
            if let Some(ext) = path.extension() {
                let ext_str = ext.to_str().unwrap_or("");
                if image_loader::is_supported_extension(ext_str) {
                    files.push(path);
                }
            }
        }
    }

    files.sort();
    Ok(files)
}
