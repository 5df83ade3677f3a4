//! Human-readable text output.
//!
//! One `duplicate -> canonical` line per pair, then warnings and a summary.
//! Colors come from yansi and are dropped when `yansi::disable()` was called.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::BatchDeleteResult;
use crate::duplicates::{CopiedFile, CopyReport, DedupReport, DuplicatePair, ScanSummary, ScanWarning};

/// Text formatter over a finished run.
pub struct TextOutput<'a> {
    pairs: &'a [DuplicatePair],
    warnings: &'a [ScanWarning],
    summary: &'a ScanSummary,
    duration: Duration,
    copied_files: Option<&'a [CopiedFile]>,
    copy_failures: &'a [ScanWarning],
    deletion: Option<&'a BatchDeleteResult>,
}

impl<'a> TextOutput<'a> {
    /// Formatter for a within- or across-folder run.
    #[must_use]
    pub fn from_dedup(report: &'a DedupReport) -> Self {
        Self {
            pairs: &report.pairs,
            warnings: &report.warnings,
            summary: &report.summary,
            duration: report.duration,
            copied_files: None,
            copy_failures: &[],
            deletion: None,
        }
    }

    /// Formatter for a copy-uniques run.
    #[must_use]
    pub fn from_copy(report: &'a CopyReport) -> Self {
        Self {
            pairs: &report.pairs,
            warnings: &report.warnings,
            summary: &report.summary,
            duration: report.duration,
            copied_files: Some(&report.copied_files),
            copy_failures: &report.copy_failures,
            deletion: None,
        }
    }

    /// Include the outcome of a deletion step.
    #[must_use]
    pub fn with_deletion(mut self, result: &'a BatchDeleteResult) -> Self {
        self.deletion = Some(result);
        self
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for pair in self.pairs {
            writeln!(
                writer,
                "{} -> {}",
                display(&pair.duplicate.path).yellow(),
                display(&pair.canonical.path).green()
            )?;
        }

        if let Some(copied) = self.copied_files {
            for file in copied {
                writeln!(
                    writer,
                    "{} {} -> {}",
                    "copied".cyan(),
                    display(&file.source),
                    display(&file.destination).green()
                )?;
            }
        }

        self.write_problems(writer, "Warnings", self.warnings)?;
        self.write_problems(writer, "Copy failures", self.copy_failures)?;

        if let Some(result) = self.deletion {
            writeln!(writer)?;
            writeln!(writer, "{}", result.summary().bold())?;
            for (path, message) in &result.failures {
                writeln!(writer, "  {}: {}", display(path).red(), message)?;
            }
        }

        writeln!(writer)?;
        writeln!(writer, "{}", self.summary_line().bold())?;
        Ok(())
    }

    fn write_problems<W: Write>(&self, writer: &mut W, title: &str, problems: &[ScanWarning]) -> io::Result<()> {
        if problems.is_empty() {
            return Ok(());
        }
        writeln!(writer)?;
        writeln!(writer, "{} ({}):", title.red().bold(), problems.len())?;
        for problem in problems {
            writeln!(writer, "  {}: {}", display(&problem.path), problem.message.dim())?;
        }
        Ok(())
    }

    fn summary_line(&self) -> String {
        let s = self.summary;
        let mut line = format!(
            "{} entries, {} hashed, {} duplicate(s) in {} group(s), {} reclaimable",
            s.total_entries,
            s.hashed,
            s.duplicate_files,
            s.duplicate_groups,
            ByteSize(s.wasted_bytes)
        );
        if s.skipped_entries > 0 {
            line.push_str(&format!(", {} skipped", s.skipped_entries));
        }
        if s.failed > 0 {
            line.push_str(&format!(", {} unreadable", s.failed));
        }
        if let Some(copied) = self.copied_files {
            line.push_str(&format!(", {} copied", copied.len()));
        }
        line.push_str(&format!(" ({} ms)", self.duration.as_millis()));
        line
    }

    /// Render to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if formatting fails.
    pub fn to_string(&self) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
