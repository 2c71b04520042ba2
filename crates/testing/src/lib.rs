//! Testing utilities for the graph challenge pipeline
//!
//! This crate provides:
//! - Fixtures built around one small, hand-checkable ground truth
//! - Builder patterns for tables, metadata, and runs
//! - In-memory implementations of the storage ports
//! - Filesystem writers for inbox and ground-truth layouts
//!
//! # Examples
//!
//! ```
//! use graph_challenge_domain::Dataset;
//! use graph_challenge_testing::{builders::*, fixtures::*};
//!
//! // A run that predicts class 0 everywhere
//! let run = create_constant_run("alpha", "run-1", 0);
//!
//! // A custom prediction table
//! let table = TableBuilder::new().assignment(1, 0).assignment(2, 1).build();
//! assert_eq!(table.len(), 2);
//! assert_eq!(run.predictions_for(Dataset::Mutag).map(|t| t.len()), Some(4));
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
