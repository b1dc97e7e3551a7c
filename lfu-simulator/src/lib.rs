// LFU Page Replacement Simulator Library

pub mod error;
pub mod frames;
pub mod input;
pub mod report;
pub mod runner;

pub use error::{Result, SimulationError};

/// A page number in a reference string.
pub type Page = i64;
