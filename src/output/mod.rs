//! Output module for assembling and writing the final document
//!
//! This module handles:
//! - Walking the navigation tree and inlining rendered pages
//! - Generating the optional table of contents
//! - Writing the document to disk

mod document;
mod toc;

pub use document::{plan_document, AssemblyStats, DocumentAssembler, Step, SEPARATOR};
pub use toc::{generate_toc, slugify, TOC_HEADING};

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Writes the assembled document as UTF-8, creating parent directories
pub fn write_document(path: &Path, document: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(document.as_bytes())?;

    Ok(())
}
