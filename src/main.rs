//! # Etiqueta CLI
//!
//! Command-line interface for generating label sheets.
//!
//! ## Usage
//!
//! ```bash
//! # Render hardware labels from a CSV
//! etiqueta render --input inventory.csv --output labels --profile hardware
//!
//! # Cable labels in file order, custom file stem
//! etiqueta render --input links.csv --output out --profile cable \
//!     --base cable_sheet --no-sort
//!
//! # List available profiles
//! etiqueta profiles
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use etiqueta::{
    EtiquetaError, LabelProfile, PageFormat,
    pipeline::{self, RunOptions},
    render::label_size,
};

/// Etiqueta - QR label sheet generator
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render label sheets from a delimited input table
    Render {
        /// Input table (`;`-delimited, `|`-quoted, header row)
        #[arg(long)]
        input: PathBuf,

        /// Output directory (created if absent)
        #[arg(long, default_value = "labels")]
        output: PathBuf,

        /// Label profile: badge, hardware, cable, or flag
        #[arg(long)]
        profile: String,

        /// Output file stem; pages become <base>_<n>.png
        #[arg(long, default_value = "labels_a4_sheet")]
        base: String,

        /// Keep file order instead of the profile's sort key
        #[arg(long)]
        no_sort: bool,
    },

    /// List built-in label profiles
    Profiles {
        /// Emit profiles as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            profile,
            base,
            no_sort,
        } => {
            let profile = LabelProfile::parse(&profile).map_err(EtiquetaError::Profile)?;
            let summary = pipeline::run(&RunOptions {
                input,
                output_dir: output.clone(),
                base,
                profile,
                page: PageFormat::A4_300,
                sort: !no_sort,
            })?;

            if summary.labels == 0 {
                println!("No records found.");
            } else {
                println!(
                    "{} labels on {} page(s) in {}",
                    summary.labels,
                    summary.pages.len(),
                    output.display()
                );
            }
        }

        Commands::Profiles { json } => {
            let profiles = LabelProfile::built_in();
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&profiles)
                        .expect("profiles serialize to JSON")
                );
            } else {
                let page = PageFormat::A4_300;
                println!("Available profiles:");
                for p in &profiles {
                    let (w, h) = label_size(p, &page);
                    println!(
                        "  {:<10} {}x{}mm ({}x{}px), grid {}x{}, {} per sheet",
                        p.name,
                        p.width_mm,
                        p.height_mm,
                        w,
                        h,
                        p.grid_cols,
                        p.grid_rows,
                        p.sheet_capacity()
                    );
                }
            }
        }
    }

    Ok(())
}
