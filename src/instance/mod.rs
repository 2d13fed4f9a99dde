//! # Instance Format
//!
//! Instances are stored as line-oriented text. One line lists the universe, every
//! other line describes one candidate set:
//!
//! ```text
//! points: p1, p2, p3
//! c1: p1, p2
//! c2: p2, p3
//! c3: p1, p3
//! ```
//!
//! Blank lines are skipped and whitespace around identifiers is ignored. If the
//! `points` line appears more than once, the last one wins.
//!
//! ## Example
//!
//! ```rust
//! use camcover::instance::Instance;
//!
//! let instance: Instance = "points: p1, p2\nc1: p1\nc2: p2, p1\n".parse().unwrap();
//! assert_eq!(instance.points().len(), 2);
//! assert_eq!(instance.sets()[1].0, "c2");
//! ```

pub mod generator;

pub use generator::{InstanceGenerator, InstanceGeneratorOptions, InstanceGeneratorOptionsBuilder};

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CoverError, Result};

const POINTS_KEY: &str = "points";

/// A set-cover instance as read from (or written to) the text format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instance {
    points: Vec<String>,
    sets: Vec<(String, Vec<String>)>,
}

impl Instance {
    pub fn new(points: Vec<String>, sets: Vec<(String, Vec<String>)>) -> Self {
        Self { points, sets }
    }

    pub fn points(&self) -> &[String] {
        &self.points
    }

    /// Candidate sets in file order.
    pub fn sets(&self) -> &[(String, Vec<String>)] {
        &self.sets
    }

    /// Parses the text format.
    ///
    /// # Errors
    ///
    /// Returns `CoverError::Parse` for a non-blank line without a `:` separator or
    /// with an empty identifier.
    pub fn parse(text: &str) -> Result<Self> {
        let mut points = Vec::new();
        let mut sets = Vec::new();

        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let (head, tail) = line.split_once(':').ok_or_else(|| CoverError::Parse {
                line: number + 1,
                message: format!("expected `<id>: <points>`, found `{}`", line),
            })?;
            let id = head.trim();
            if id.is_empty() {
                return Err(CoverError::Parse {
                    line: number + 1,
                    message: "missing identifier before `:`".to_string(),
                });
            }

            let members = split_list(tail);
            if id == POINTS_KEY {
                points = members;
            } else {
                sets.push((id.to_string(), members));
            }
        }

        Ok(Self { points, sets })
    }

    /// Reads and parses the instance file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Writes the instance in the text format to `path`.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl FromStr for Instance {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", POINTS_KEY, self.points.join(", "))?;
        for (id, members) in &self.sets {
            writeln!(f, "{}: {}", id, members.join(", "))?;
        }
        Ok(())
    }
}
