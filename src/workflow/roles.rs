//! Role catalog: who sits on each kind of team, who approves, and what the
//! human gate is asked.

use super::types::{InterventionPoint, TeamKind, TeamLevel};

/// A named agent role and its system message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: String,
    pub system_message: String,
}

impl RoleSpec {
    fn new(name: &str, system_message: &str) -> Self {
        Self {
            name: name.to_string(),
            system_message: system_message.to_string(),
        }
    }
}

const INNER_POINTS: [InterventionPoint; 4] = [
    InterventionPoint("Task initiation approval"),
    InterventionPoint("Intermediate milestone reviews"),
    InterventionPoint("Final output validation"),
    InterventionPoint("Resource requirement approval"),
];

const OUTER_POINTS: [InterventionPoint; 4] = [
    InterventionPoint("Strategic direction approval"),
    InterventionPoint("Inter-team conflict resolution"),
    InterventionPoint("Resource allocation decisions"),
    InterventionPoint("Final deliverable validation"),
];

/// Ordered intervention points for a coordination level.
pub fn intervention_points(level: TeamLevel) -> Vec<InterventionPoint> {
    match level {
        TeamLevel::Inner => INNER_POINTS.to_vec(),
        TeamLevel::Outer => OUTER_POINTS.to_vec(),
    }
}

/// The role agents of a team, in speaking order.
pub fn role_agents(kind: TeamKind) -> Vec<RoleSpec> {
    match kind {
        TeamKind::Research => vec![
            RoleSpec::new(
                "Research_Analyst",
                "You are a Research Analyst focused on market research and competitive analysis. \
                 Gather data, analyze market trends and give insights for strategic decisions. \
                 Work with the other team members and ask the human supervisor to approve key decisions.",
            ),
            RoleSpec::new(
                "Data_Validator",
                "You are a Data Validator responsible for data accuracy and reliability. \
                 Verify sources, check for bias and validate analytical conclusions. \
                 Raise concerns with the human supervisor.",
            ),
            RoleSpec::new(
                "Strategy_Advisor",
                "You are a Strategy Advisor who turns research insights into actionable recommendations. \
                 Keep every recommendation tied to business objectives and get human sign-off.",
            ),
        ],
        TeamKind::Development => vec![
            RoleSpec::new(
                "Technical_Architect",
                "You are a Technical Architect responsible for system design. \
                 Design scalable, robust systems, recommend technology stacks and get human approval \
                 for major decisions.",
            ),
            RoleSpec::new(
                "Implementation_Planner",
                "You are an Implementation Planner. Break the project into phases, estimate the \
                 resources each needs and keep the human supervisor informed of planning decisions.",
            ),
            RoleSpec::new(
                "Quality_Assurance",
                "You are a Quality Assurance specialist. Define quality criteria, review technical \
                 specifications and escalate quality concerns to the human supervisor.",
            ),
        ],
        TeamKind::Coordination => vec![
            RoleSpec::new(
                "Team_Coordinator",
                "You are a Team Coordinator managing communication between the research and \
                 development teams. Resolve dependencies, keep the teams aligned and escalate \
                 strategic decisions to the executive.",
            ),
            RoleSpec::new(
                "Resource_Manager",
                "You are a Resource Manager optimizing resource allocation across teams. \
                 Identify bottlenecks, propose reallocations and escalate conflicts to the executive.",
            ),
            RoleSpec::new(
                "Output_Validator",
                "You are an Output Validator checking that team deliverables integrate cleanly and \
                 consistently. Give final quality assurance before executive approval.",
            ),
        ],
    }
}

/// The single human-approval role for a team.
pub fn approver(kind: TeamKind, team_name: &str) -> RoleSpec {
    match kind {
        TeamKind::Research => RoleSpec::new(
            &format!("{team_name}_Human"),
            &format!(
                "You are the human supervisor for the {team_name}. Provide oversight, approve key \
                 decisions and guide the team's direction. You may approve, modify or reject \
                 agent recommendations."
            ),
        ),
        TeamKind::Development => RoleSpec::new(
            &format!("{team_name}_Human"),
            &format!(
                "You are the human supervisor for the {team_name}. Provide technical oversight, \
                 approve architectural decisions and hold the quality bar. You may approve, modify \
                 or reject technical recommendations."
            ),
        ),
        TeamKind::Coordination => RoleSpec::new(
            "Executive_Supervisor",
            "You are the Executive Supervisor with strategic oversight authority. Make high-level \
             decisions, resolve inter-team conflicts and give final approval on direction and \
             resource allocation.",
        ),
    }
}

/// Opening message the human gate receives before the team starts.
pub fn approval_message(level: TeamLevel, team_name: &str, task: &str) -> String {
    let task = task.trim();
    match level {
        TeamLevel::Inner => format!(
            "HUMAN APPROVAL REQUIRED:\n\n\
             Task: {task}\n\n\
             Team: {team_name}\n\n\
             Please review this task and give your approval to proceed.\n\
             You can:\n\
             1. APPROVE - let the team proceed as planned\n\
             2. MODIFY - add constraints or requirements\n\
             3. REJECT - stop the task and give another direction\n\n\
             What is your decision?"
        ),
        TeamLevel::Outer => format!(
            "EXECUTIVE DECISION REQUIRED:\n\n\
             Coordination Task: {task}\n\n\
             Several teams are involved and need high-level coordination.\n\n\
             As Executive Supervisor, please review:\n\
             1. Strategic alignment with business objectives\n\
             2. Resource allocation across teams\n\
             3. Risks and their mitigation\n\
             4. Success criteria and how they are validated\n\n\
             Give your executive guidance and approval to proceed."
        ),
    }
}
