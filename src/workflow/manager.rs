use super::architecture::{ArchitectureCoordinator, WorkflowSettings};
use super::report::WorkflowReport;
use crate::engine::Collaborator;
use crate::error::WorkflowError;

/// Top-level entry point: owns the coordinator and runs the demonstration.
pub struct WorkflowManager {
    architecture: ArchitectureCoordinator,
}

impl WorkflowManager {
    pub fn new(collaborator: Collaborator, settings: WorkflowSettings) -> Self {
        Self {
            architecture: ArchitectureCoordinator::new(collaborator, settings),
        }
    }

    pub async fn demonstrate_complete_workflow(&mut self) -> Result<WorkflowReport, WorkflowError> {
        println!("🏗️ Society of Mind Demo");
        println!("{}", "=".repeat(50));

        let report = self.architecture.run_demonstration().await?;
        tracing::info!(
            total = report.som_architecture_summary.total_workflows,
            inner = report.som_architecture_summary.inner_team_workflows,
            outer = report.som_architecture_summary.outer_team_workflows,
            "Workflow report generated"
        );
        Ok(report)
    }

    pub fn architecture(&self) -> &ArchitectureCoordinator {
        &self.architecture
    }
}
