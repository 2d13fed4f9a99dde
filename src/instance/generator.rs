//! # Random instance generator
//!
//! Produces coverable instances for experiments and benchmarks. Every point is
//! first dealt round-robin into a random number of base groups, which guarantees
//! coverage; then random groups of a few distinct points are added until the
//! target group count is reached. Groups are shuffled and named `c1..cN`.

use tracing::debug;

use super::Instance;
use crate::error::{CoverError, Result};
use crate::rng::RandomNumberGenerator;

/// Parameters of the random instance generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceGeneratorOptions {
    num_points: usize,
    min_base_groups: usize,
    max_base_groups: usize,
    total_groups: usize,
    min_group_size: usize,
    max_group_size: usize,
}

impl InstanceGeneratorOptions {
    pub fn get_num_points(&self) -> usize {
        self.num_points
    }

    pub fn get_base_groups(&self) -> (usize, usize) {
        (self.min_base_groups, self.max_base_groups)
    }

    pub fn get_total_groups(&self) -> usize {
        self.total_groups
    }

    pub fn get_group_size(&self) -> (usize, usize) {
        (self.min_group_size, self.max_group_size)
    }

    pub fn builder() -> InstanceGeneratorOptionsBuilder {
        InstanceGeneratorOptionsBuilder::default()
    }

    /// # Errors
    ///
    /// Returns `CoverError::Configuration` for empty or inverted ranges, or when
    /// groups would need more distinct points than exist.
    pub fn validate(&self) -> Result<()> {
        if self.num_points == 0 {
            return Err(CoverError::Configuration(
                "Number of points must be greater than 0".to_string(),
            ));
        }
        if self.min_base_groups == 0 || self.min_base_groups > self.max_base_groups {
            return Err(CoverError::Configuration(format!(
                "Invalid base group range {}..={}",
                self.min_base_groups, self.max_base_groups
            )));
        }
        if self.max_base_groups > self.num_points {
            return Err(CoverError::Configuration(
                "More base groups than points".to_string(),
            ));
        }
        if self.min_group_size == 0
            || self.min_group_size > self.max_group_size
            || self.max_group_size > self.num_points
        {
            return Err(CoverError::Configuration(format!(
                "Invalid group size range {}..={} for {} points",
                self.min_group_size, self.max_group_size, self.num_points
            )));
        }
        Ok(())
    }
}

impl Default for InstanceGeneratorOptions {
    fn default() -> Self {
        Self {
            num_points: 200,
            min_base_groups: 20,
            max_base_groups: 50,
            total_groups: 100,
            min_group_size: 3,
            max_group_size: 4,
        }
    }
}

/// Builder for `InstanceGeneratorOptions`.
#[derive(Debug, Clone, Default)]
pub struct InstanceGeneratorOptionsBuilder {
    num_points: Option<usize>,
    base_groups: Option<(usize, usize)>,
    total_groups: Option<usize>,
    group_size: Option<(usize, usize)>,
}

impl InstanceGeneratorOptionsBuilder {
    pub fn num_points(mut self, value: usize) -> Self {
        self.num_points = Some(value);
        self
    }

    /// Inclusive range for the number of round-robin base groups.
    pub fn base_groups(mut self, min: usize, max: usize) -> Self {
        self.base_groups = Some((min, max));
        self
    }

    pub fn total_groups(mut self, value: usize) -> Self {
        self.total_groups = Some(value);
        self
    }

    /// Inclusive range for the size of the extra random groups.
    pub fn group_size(mut self, min: usize, max: usize) -> Self {
        self.group_size = Some((min, max));
        self
    }

    pub fn build(self) -> InstanceGeneratorOptions {
        let defaults = InstanceGeneratorOptions::default();
        let (min_base_groups, max_base_groups) = self
            .base_groups
            .unwrap_or((defaults.min_base_groups, defaults.max_base_groups));
        let (min_group_size, max_group_size) = self
            .group_size
            .unwrap_or((defaults.min_group_size, defaults.max_group_size));
        InstanceGeneratorOptions {
            num_points: self.num_points.unwrap_or(defaults.num_points),
            min_base_groups,
            max_base_groups,
            total_groups: self.total_groups.unwrap_or(defaults.total_groups),
            min_group_size,
            max_group_size,
        }
    }
}

/// Generates random coverable instances.
#[derive(Debug, Clone, Default)]
pub struct InstanceGenerator {
    options: InstanceGeneratorOptions,
}

impl InstanceGenerator {
    /// # Errors
    ///
    /// Returns `CoverError::Configuration` if the options are invalid.
    pub fn new(options: InstanceGeneratorOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &InstanceGeneratorOptions {
        &self.options
    }

    /// Draws a new instance. Every point is covered by at least one group, so the
    /// result is always coverable.
    pub fn generate(&self, rng: &mut RandomNumberGenerator) -> Instance {
        let o = &self.options;
        let points: Vec<String> = (1..=o.num_points).map(|i| format!("p{}", i)).collect();

        let base = rng.range_inclusive(o.min_base_groups, o.max_base_groups);
        let mut dealt = points.clone();
        rng.shuffle(&mut dealt);
        let mut groups: Vec<Vec<String>> = vec![Vec::new(); base];
        for (i, point) in dealt.into_iter().enumerate() {
            groups[i % base].push(point);
        }

        while groups.len() < o.total_groups {
            let size = rng.range_inclusive(o.min_group_size, o.max_group_size);
            groups.push(rng.sample(&points, size));
        }
        rng.shuffle(&mut groups);

        debug!(points = points.len(), base, groups = groups.len(), "generated instance");

        let sets = groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| (format!("c{}", i + 1), group))
            .collect();
        Instance::new(points, sets)
    }
}
