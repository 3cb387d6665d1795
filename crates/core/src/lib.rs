//! # CDI Core
//!
//! View logic for the clinical data integration dashboard.
//!
//! This crate contains pure derivations over the static record collections:
//! - A generic list-view controller (filter, free-text search, stable sort,
//!   single-row expansion) in [`view`]
//! - Per-collection view bindings and whole-store summaries in [`views`]
//! - The simulated connection probe in [`probe`]
//! - Startup configuration in [`config`]
//!
//! **No API concerns**: HTTP routing, serde wire handling for requests, and
//! terminal rendering belong in `cdi-run` and `cdi-cli`. Nothing here reads
//! the environment or performs I/O.

pub mod config;
pub mod error;
pub mod probe;
pub mod view;
pub mod views;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use probe::{ConnectionProbe, ProbeOutcome, SimulatedProbe};
pub use view::{percentage, project, SortOrder, SortState, SortValue, ViewRecord, ViewState};
