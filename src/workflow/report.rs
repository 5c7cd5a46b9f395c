//! Workflow report: a read-only aggregate over the workflow log.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use super::types::{TeamLevel, WorkflowLogEntry};

/// Categories of human intervention used across the architecture.
pub const HUMAN_INTERVENTION_POINTS: [&str; 5] = [
    "Task initiation approval",
    "Milestone reviews",
    "Resource allocation decisions",
    "Final output validation",
    "Strategic direction guidance",
];

pub const ARCHITECTURE_BENEFITS: [&str; 5] = [
    "Human oversight at critical decision points",
    "Multi-level decision making (inner and outer teams)",
    "Specialized agent roles with clear responsibilities",
    "Flexible intervention based on task complexity",
    "Comprehensive audit trail of decisions",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchitectureSummary {
    pub total_workflows: usize,
    pub inner_team_workflows: usize,
    pub outer_team_workflows: usize,
    pub human_intervention_points: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkflowReport {
    pub som_architecture_summary: ArchitectureSummary,
    pub workflow_log: Vec<WorkflowLogEntry>,
    pub architecture_benefits: Vec<String>,
}

impl WorkflowReport {
    /// Aggregate `entries`. Anything not at the outer level counts as inner.
    pub fn generate(entries: &[WorkflowLogEntry]) -> Self {
        let outer_team_workflows = entries
            .iter()
            .filter(|e| e.level == TeamLevel::Outer)
            .count();

        Self {
            som_architecture_summary: ArchitectureSummary {
                total_workflows: entries.len(),
                inner_team_workflows: entries.len() - outer_team_workflows,
                outer_team_workflows,
                human_intervention_points: HUMAN_INTERVENTION_POINTS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            workflow_log: entries.to_vec(),
            architecture_benefits: ARCHITECTURE_BENEFITS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the pretty JSON report to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = self.to_pretty_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}
