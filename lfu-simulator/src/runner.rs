//! Simulation runner
//!
//! Drives an [`LfuCache`] with a page reference string and records what
//! happened at every step.

use crate::frames::FrameTable;
use crate::Page;
use lfu_cache::LfuCache;
use std::fmt;
use tracing::{debug, info};

/// What a single reference did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The page was resident; its frequency went up by one
    Hit,
    /// The page was not resident and was loaded
    Fault {
        /// Page evicted to make room, if any
        removed: Option<Page>,
        /// Frame the new page was placed in (`None` for a zero-capacity cache)
        row: Option<usize>,
    },
}

impl Outcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => write!(f, "Page Hit"),
            Outcome::Fault { removed, row } => {
                write!(f, "Page Fault")?;
                if let Some(page) = removed {
                    write!(f, " (Removed: {page})")?;
                }
                if let Some(row) = row {
                    write!(f, " (Added to Row: {row})")?;
                }
                Ok(())
            }
        }
    }
}

/// One row of the simulation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    /// The page that was referenced
    pub page: Page,
    pub outcome: Outcome,
    /// Frequency buckets after the step, highest frequency first
    pub cache_state: Vec<(u64, Vec<Page>)>,
    /// Resident pages and their frequency after the step, sorted by page
    pub frequencies: Vec<(Page, u64)>,
}

/// Replays page references through an LFU cache.
#[derive(Debug)]
pub struct Simulation {
    cache: LfuCache<Page, ()>,
    frames: FrameTable,
}

impl Simulation {
    /// Create a simulation with `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LfuCache::new(capacity),
            frames: FrameTable::new(capacity),
        }
    }

    /// Process one reference.
    pub fn step(&mut self, page: Page) -> StepRecord {
        let outcome = if self.cache.get(&page).is_some() {
            Outcome::Hit
        } else {
            let removed = self.cache.put(page, ()).map(|(evicted, ())| evicted);
            let row = if self.cache.contains(&page) {
                self.frames.assign(page, removed)
            } else {
                None
            };
            Outcome::Fault { removed, row }
        };

        debug!(page, %outcome, "simulated reference");

        StepRecord {
            page,
            outcome,
            cache_state: self.cache.frequency_table(),
            frequencies: self.sorted_frequencies(),
        }
    }

    /// Process every reference in order.
    pub fn run(&mut self, references: &[Page]) -> Vec<StepRecord> {
        let records: Vec<StepRecord> = references.iter().map(|&page| self.step(page)).collect();
        info!(
            references = records.len(),
            hits = self.hits(),
            faults = self.faults(),
            "simulation finished"
        );
        records
    }

    /// The cache being simulated.
    pub fn cache(&self) -> &LfuCache<Page, ()> {
        &self.cache
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    /// References that found their page resident.
    pub fn hits(&self) -> u64 {
        self.cache.metrics().core.cache_hits
    }

    /// References that had to load their page.
    pub fn faults(&self) -> u64 {
        self.cache.metrics().core.cache_misses()
    }

    fn sorted_frequencies(&self) -> Vec<(Page, u64)> {
        let mut frequencies: Vec<(Page, u64)> =
            self.cache.snapshot_frequencies().into_iter().collect();
        frequencies.sort_unstable();
        frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Hit.to_string(), "Page Hit");
        assert_eq!(
            Outcome::Fault {
                removed: None,
                row: Some(2)
            }
            .to_string(),
            "Page Fault (Added to Row: 2)"
        );
        assert_eq!(
            Outcome::Fault {
                removed: Some(7),
                row: Some(1)
            }
            .to_string(),
            "Page Fault (Removed: 7) (Added to Row: 1)"
        );
    }

    #[test]
    fn test_hits_and_faults() {
        let mut sim = Simulation::new(3);
        let records = sim.run(&[1, 2, 3, 1, 2, 4, 3]);

        let outcomes: Vec<String> = records.iter().map(|r| r.outcome.to_string()).collect();
        assert_eq!(
            outcomes,
            vec![
                "Page Fault (Added to Row: 1)",
                "Page Fault (Added to Row: 2)",
                "Page Fault (Added to Row: 3)",
                "Page Hit",
                "Page Hit",
                "Page Fault (Removed: 3) (Added to Row: 3)",
                "Page Fault (Removed: 4) (Added to Row: 3)",
            ]
        );
        assert_eq!(sim.hits(), 2);
        assert_eq!(sim.faults(), 5);
    }

    #[test]
    fn test_step_records_state_after_reference() {
        let mut sim = Simulation::new(3);
        sim.step(5);
        sim.step(6);
        let record = sim.step(5);

        assert!(record.outcome.is_hit());
        assert_eq!(record.cache_state, vec![(2, vec![5]), (1, vec![6])]);
        assert_eq!(record.frequencies, vec![(5, 2), (6, 1)]);
    }

    #[test]
    fn test_evicted_row_goes_to_new_page() {
        let mut sim = Simulation::new(2);
        sim.run(&[1, 2, 1]);
        let record = sim.step(9);

        assert_eq!(
            record.outcome,
            Outcome::Fault {
                removed: Some(2),
                row: Some(2)
            }
        );
        assert_eq!(sim.frames().row_of(9), Some(2));
        assert_eq!(sim.frames().row_of(1), Some(1));
    }

    #[test]
    fn test_zero_capacity_always_faults() {
        let mut sim = Simulation::new(0);
        let records = sim.run(&[1, 1, 1]);

        assert!(records.iter().all(|r| r.outcome
            == Outcome::Fault {
                removed: None,
                row: None
            }));
        assert!(records.iter().all(|r| r.cache_state.is_empty()));
        assert_eq!(sim.hits(), 0);
    }

    #[test]
    fn test_frame_count_matches_cache() {
        let mut sim = Simulation::new(3);
        sim.run(&[4, 8, 15, 16, 23, 42, 4, 8, 15]);
        assert_eq!(sim.frames().len(), sim.cache().len());
        for (page, _) in sim.step(16).frequencies {
            assert!(sim.frames().row_of(page).is_some());
        }
    }
}
