//! Page-range handling and the external PDF text extraction capability.
//!
//! Extraction itself is collaborator-owned: we shell out to pdftotext and
//! accept whatever plain text it produces, including an empty string.

use crate::error::{NarrateError, Result};
use std::fmt;
use std::path::Path;
use std::process::Command;

/// An inclusive, 1-based page range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    /// Validate and construct a range. Pages are 1-based and `start` must not
    /// exceed `end`.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start < 1 || start > end {
            return Err(NarrateError::InvalidPageRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a range string like `"3-10"` or a single page like `"7"`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || NarrateError::InvalidPageRange { start: 0, end: 0 };

        match s.split_once('-') {
            Some((a, b)) => {
                let start: u32 = a.trim().parse().map_err(|_| invalid())?;
                let end: u32 = b.trim().parse().map_err(|_| invalid())?;
                Self::new(start, end)
            }
            None => {
                let page: u32 = s.trim().parse().map_err(|_| invalid())?;
                Self::new(page, page)
            }
        }
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Extract plain text for a page range by invoking pdftotext.
///
/// May legitimately return an empty string (e.g. image-only pages); the
/// caller decides whether that is an error.
pub fn extract_pages(pdf_path: &Path, pages: &PageRange) -> Result<String> {
    if !pdf_path.is_file() {
        return Err(NarrateError::Extraction(format!(
            "PDF not found: {}",
            pdf_path.display()
        )));
    }

    let output = Command::new("pdftotext")
        .args(["-f", &pages.start.to_string()])
        .args(["-l", &pages.end.to_string()])
        .args(["-enc", "UTF-8"])
        .arg(pdf_path)
        .arg("-")
        .output()
        .map_err(|e| NarrateError::Extraction(format!("failed to run pdftotext: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(NarrateError::Extraction(format!(
            "pdftotext exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
