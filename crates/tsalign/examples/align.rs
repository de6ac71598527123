//! Example: profile two delimited data files and align their value columns.
//!
//! Usage:
//!   cargo run --example align -- <baseline_file> <comparison_file>

use std::env;
use std::fs;

use tsalign::{AlignmentEngine, Parser};

fn main() -> tsalign::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --example align -- <baseline_file> <comparison_file>");
        std::process::exit(1);
    }

    let baseline_bytes = fs::read(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[1]);
        std::process::exit(1);
    });
    let comparison_bytes = fs::read(&args[2]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[2]);
        std::process::exit(1);
    });

    let parser = Parser::new();
    let (mut baseline, baseline_meta) = parser.parse_bytes(&baseline_bytes)?;
    let (mut comparison, comparison_meta) = parser.parse_bytes(&comparison_bytes)?;

    println!("## Baseline");
    println!("  Format: {}", baseline_meta.format);
    println!("  Rows: {}", baseline_meta.row_count);
    println!("  Columns: {}", baseline_meta.column_count);
    println!();
    println!("## Comparison");
    println!("  Format: {}", comparison_meta.format);
    println!("  Rows: {}", comparison_meta.row_count);
    println!("  Columns: {}", comparison_meta.column_count);
    println!();

    let engine = AlignmentEngine::new();
    let alignment = engine.align_datasets(&mut baseline, &mut comparison)?;

    println!("## Alignment");
    println!(
        "  Value columns: '{}' vs '{}'",
        alignment.baseline_column, alignment.comparison_column
    );
    println!("  Path length: {}", alignment.result.path.len());
    println!("  DTW distance: {:.6}", alignment.result.total_distance);

    Ok(())
}
