//! # Pipeline
//!
//! Wires loader → composer → renderer → compositor → writer into one
//! synchronous batch run. Each record's label is fully rendered before
//! the next begins; each page is written before the next page's canvas
//! is allocated.

use std::path::PathBuf;

use crate::compose;
use crate::error::EtiquetaError;
use crate::loader;
use crate::page::PageFormat;
use crate::profile::LabelProfile;
use crate::render::{label_size, render_label};
use crate::sheet::{Compositor, SheetLayout};
use crate::writer::PageWriter;

/// One batch run's inputs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Input table path.
    pub input: PathBuf,
    /// Output directory, created if absent.
    pub output_dir: PathBuf,
    /// Output file stem; pages become `<base>_<n>.png`.
    pub base: String,
    /// Label profile for the run.
    pub profile: LabelProfile,
    /// Output page format.
    pub page: PageFormat,
    /// Apply the profile's sort key (false keeps file order).
    pub sort: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of labels rendered (= input data rows).
    pub labels: usize,
    /// Written page files, in page order.
    pub pages: Vec<PathBuf>,
    /// Name of the detected input encoding.
    pub encoding: &'static str,
}

/// Execute one batch run.
pub fn run(opts: &RunOptions) -> Result<RunSummary, EtiquetaError> {
    let sort_columns: &[String] = if opts.sort {
        &opts.profile.sort_columns
    } else {
        &[]
    };
    let (records, encoding) = loader::load_records(&opts.input, sort_columns)?;

    if records.is_empty() {
        tracing::warn!("no records found, nothing to render");
        return Ok(RunSummary {
            labels: 0,
            pages: Vec::new(),
            encoding,
        });
    }

    let writer = PageWriter::new(&opts.output_dir, &opts.base)?;
    let (label_w, label_h) = label_size(&opts.profile, &opts.page);
    let layout = SheetLayout::new(&opts.profile, &opts.page, label_w, label_h);
    let mut compositor = Compositor::new(layout);

    let mut pages = Vec::new();
    for record in &records {
        let spec = compose::spec_for(&opts.profile, record)?;
        let label = render_label(&opts.profile, &opts.page, &spec)?;
        if let Some(done) = compositor.place(&label) {
            pages.push(writer.write(done, pages.len() + 1)?);
        }
    }
    if let Some(done) = compositor.finish() {
        pages.push(writer.write(done, pages.len() + 1)?);
    }

    tracing::info!(
        labels = records.len(),
        pages = pages.len(),
        "run complete"
    );

    Ok(RunSummary {
        labels: records.len(),
        pages,
        encoding,
    })
}
