//! Heuristic analysis of extracted source trees.
//!
//! # Module Structure
//!
//! - [`walk`] - Enumeration with the shared ignore-list and important-file rules
//! - [`signatures`] - Static technology signature table
//! - [`detector`] - Path and content based technology detection
//! - [`describe`] - Rule-based description text
//! - [`analyzer`] - Whole-tree analysis combining the above

mod analyzer;
mod describe;
mod detector;
pub mod signatures;
pub mod walk;

pub use analyzer::{AnalysisError, ProjectAnalysis, analyze};
pub use describe::{DescriptionSignals, describe};
pub use detector::{DetectedTechnology, detect};
