use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use unmarklm::{
    default_output_path, ProcessOptions, ProcessResult, RemovalMethod, WatermarkRegion,
};

#[derive(Parser)]
#[command(
    name = "unmark",
    about = "Remove the NotebookLM badge watermark from images",
    version,
    after_help = "Simple usage: unmark <image>  (smartfill, writes <name>_clean.<ext>)\n\n\
                  The badge position is detected from the image dimensions alone;\n\
                  use --region to override it for non-standard outputs."
)]
struct Cli {
    /// Input image file or directory
    input: String,

    /// Output file or directory (default: {name}_clean.{ext})
    #[arg(short, long)]
    output: Option<String>,

    /// Removal method: smartfill (clone stamp) or crop
    #[arg(short, long, default_value = "smartfill")]
    method: String,

    /// Override the detected watermark region as X,Y,WIDTH,HEIGHT
    #[arg(long)]
    region: Option<String>,

    /// JPEG output quality (1-100)
    #[arg(long, default_value = "95")]
    jpeg_quality: u8,

    /// Enable verbose output (includes the background complexity score)
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let method: RemovalMethod = match cli.method.parse() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if !(1..=100).contains(&cli.jpeg_quality) {
        eprintln!("Error: JPEG quality must be between 1 and 100");
        process::exit(1);
    }

    let custom_region = cli.region.as_deref().map(|spec| {
        parse_region(spec).unwrap_or_else(|| {
            eprintln!("Error: Invalid region '{spec}' (expected X,Y,WIDTH,HEIGHT)");
            process::exit(1);
        })
    });

    let opts = ProcessOptions {
        method,
        custom_region,
        jpeg_quality: cli.jpeg_quality,
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let input_path = Path::new(&cli.input);
    if !input_path.exists() {
        eprintln!("Error: Input path does not exist: {}", cli.input);
        process::exit(1);
    }

    if !opts.quiet {
        eprintln!("Method: {method}");
        eprintln!();
    }

    let results = if input_path.is_dir() {
        let output_dir = if let Some(o) = &cli.output {
            PathBuf::from(o)
        } else {
            eprintln!("Error: Output directory is required for batch processing");
            eprintln!("Usage: unmark <input_dir> -o <output_dir>");
            process::exit(1);
        };
        unmarklm::process_directory(input_path, &output_dir, &opts)
    } else {
        let output_path = match &cli.output {
            Some(o) => PathBuf::from(o),
            None => default_output_path(input_path),
        };
        vec![unmarklm::process_file(input_path, &output_path, &opts)]
    };

    let mut success_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, &opts);
        if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if results.len() > 1 && !opts.quiet {
        eprintln!();
        eprint!("[Summary] Processed: {success_count}");
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

/// Parse "X,Y,WIDTH,HEIGHT" into a region.
fn parse_region(spec: &str) -> Option<WatermarkRegion> {
    let parts: Vec<i32> = spec
        .split(',')
        .map(|p| p.trim().parse().ok())
        .collect::<Option<Vec<_>>>()?;
    if parts.len() != 4 || parts[2] < 1 || parts[3] < 1 {
        return None;
    }
    Some(WatermarkRegion {
        x: parts[0],
        y: parts[1],
        width: parts[2],
        height: parts[3],
    })
}

fn print_result(result: &ProcessResult, opts: &ProcessOptions) {
    if opts.quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.success {
        if !opts.quiet {
            eprintln!("[OK] {filename}: {}", result.message);
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if opts.verbose && result.success {
        eprintln!("  -> background complexity: {:.2}", result.complexity);
    }
}
