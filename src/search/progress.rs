//! # Progress reporting
//!
//! One [`ProgressRecord`] is emitted per search iteration. Records go to a
//! [`ProgressSink`] supplied by the caller; the engine never reads them back.
//!
//! [`TsvProgressLog`] writes the tab-separated progress log:
//!
//! ```text
//! Iteration	Best Cost	Tabu Violations	Aspiration Uses
//! 1	14	0	0
//! 2	13	0	0
//! ```
//!
//! Each row is flushed as soon as it is written, so an interrupted run leaves a
//! valid prefix behind.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Header line of the progress log (without the trailing newline).
pub const PROGRESS_HEADER: &str = "Iteration\tBest Cost\tTabu Violations\tAspiration Uses";

/// Snapshot of the search after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProgressRecord {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Best cost found so far.
    pub best_cost: usize,
    /// 1 if the move adopted this iteration did not improve the best cost, else 0.
    ///
    /// Despite the name this does not count tabu-list rejections; see
    /// [`SearchStats`](crate::search::SearchStats) for that.
    pub tabu_violations: usize,
    /// Aspiration uses reported in the log. Always 0.
    pub aspiration_uses: usize,
}

/// Receiver of per-iteration progress.
pub trait ProgressSink {
    /// Called once before the first iteration.
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, record: &ProgressRecord) -> Result<()>;

    /// Called once after the last iteration.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn begin(&mut self) -> Result<()> {
        (**self).begin()
    }

    fn record(&mut self, record: &ProgressRecord) -> Result<()> {
        (**self).record(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn record(&mut self, _record: &ProgressRecord) -> Result<()> {
        Ok(())
    }
}

/// Keeps all records in memory.
#[derive(Debug, Clone, Default)]
pub struct ProgressHistory {
    pub records: Vec<ProgressRecord>,
}

impl ProgressHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for ProgressHistory {
    fn begin(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }

    fn record(&mut self, record: &ProgressRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }
}

/// Writes the tab-separated progress log to any writer.
#[derive(Debug)]
pub struct TsvProgressLog<W: Write> {
    writer: W,
}

impl TsvProgressLog<BufWriter<File>> {
    /// Creates (or truncates) the log file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TsvProgressLog<W> {
    /// Wraps `writer`; nothing is written until the search begins.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressSink for TsvProgressLog<W> {
    fn begin(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", PROGRESS_HEADER)?;
        self.writer.flush()?;
        Ok(())
    }

    fn record(&mut self, record: &ProgressRecord) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}",
            record.iteration, record.best_cost, record.tabu_violations, record.aspiration_uses
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
