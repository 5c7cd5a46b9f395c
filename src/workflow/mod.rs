//! Human-in-the-loop team workflow.
//!
//! Inner teams ([`team::TeamManager`] at [`TeamLevel::Inner`]) work on
//! subtasks behind their own human gate; a single outer team coordinates
//! them behind an executive gate. The [`architecture::ArchitectureCoordinator`]
//! sequences both levels and builds a [`report::WorkflowReport`] from the
//! shared [`sink::WorkflowLog`].

pub mod architecture;
pub mod manager;
pub mod report;
pub mod roles;
pub mod sink;
pub mod team;
pub mod types;

pub use architecture::{ArchitectureCoordinator, WorkflowSettings};
pub use manager::WorkflowManager;
pub use report::WorkflowReport;
pub use sink::{NullSink, WorkflowLog, WorkflowSink};
pub use team::{TeamDescriptor, TeamManager};
pub use types::{
    EntryOutcome, ExecutionOutcome, FailurePolicy, InterventionPoint, TeamKind, TeamLevel,
    WorkflowLogEntry,
};
