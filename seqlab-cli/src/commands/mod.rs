//! Command implementations for SeqLab CLI

pub mod input;
pub mod compare;
pub mod consensus;
pub mod patterns;
pub mod assemble;
pub mod similarity;
pub mod stats;
pub mod search;
pub mod db;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;

/// Where command reports go: plain text or pretty JSON on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    /// Progress bar on stderr, hidden in quiet or JSON mode
    pub fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if self.json || self.quiet {
            return Ok(ProgressBar::hidden());
        }
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress bar template")?,
        );
        Ok(bar)
    }

    /// Print a report in the selected format
    pub fn emit<T: Serialize + fmt::Display>(&self, report: &T) -> Result<()> {
        if self.json {
            let rendered = serde_json::to_string_pretty(report)
                .context("Failed to serialize report")?;
            println!("{}", rendered);
        } else {
            println!("{}", report);
        }
        Ok(())
    }
}
