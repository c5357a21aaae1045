//! Built-in reference scenarios and a small runner for scenario sets.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::balance::{NO_WINNER, Outcome};
use crate::model::{AgentId, AwaySet, agents_from_scores, customers_from_scores};
use crate::roster::{Roster, Scenario};

/// Wall-clock budget a single scenario is expected to finish within.
pub const SCENARIO_TIME_BUDGET: Duration = Duration::from_secs(1);

const SHARED_CUSTOMERS: [u32; 10] = [10, 10, 10, 20, 20, 30, 30, 30, 20, 60];

/// Outcome of running one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: Outcome,
    pub expected: Option<AgentId>,
    /// `true` when there is no expectation or it matches.
    pub passed: bool,
    #[serde(serialize_with = "serialize_micros")]
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// `true` when the run took longer than [`SCENARIO_TIME_BUDGET`].
    #[must_use]
    pub fn over_budget(&self) -> bool {
        self.elapsed > SCENARIO_TIME_BUDGET
    }
}

fn serialize_micros<Ser: serde::Serializer>(d: &Duration, s: Ser) -> Result<Ser::Ok, Ser::Error> {
    s.serialize_u64(u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

fn scenario(
    name: &str,
    description: &str,
    agents: &[u32],
    customers: &[u32],
    away: &[AgentId],
    expected: AgentId,
) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: Some(description.to_string()),
        roster: Roster {
            agents: agents_from_scores(agents),
            customers: customers_from_scores(customers),
            away: away.iter().copied().collect::<AwaySet>(),
        },
        expected: Some(expected),
    }
}

/// The reference scenarios every balancer change is checked against.
#[must_use]
pub fn builtin_scenarios() -> Vec<Scenario> {
    let mut large_agents = vec![0_u32; 1000];
    large_agents[998] = 100;
    let large_customers = vec![10_u32; 10_000];

    vec![
        Scenario {
            name: "two-away".to_string(),
            description: Some("two of four agents away; lower agent leads".to_string()),
            roster: Roster {
                agents: agents_from_scores(&[60, 20, 95, 75]),
                customers: customers_from_scores(&[90, 20, 70, 40, 60, 10]),
                away: [2, 4].into_iter().collect(),
            },
            expected: Some(1),
        },
        scenario(
            "count-tie",
            "three agents serve three customers each",
            &[11, 21, 31, 3, 4, 5],
            &SHARED_CUSTOMERS,
            &[],
            NO_WINNER,
        ),
        scenario(
            "large-skewed",
            "999 agents share score 0, one agent holds every customer",
            &large_agents,
            &large_customers,
            &[1000],
            999,
        ),
        scenario(
            "all-below-demand",
            "every agent scores below every customer",
            &[1, 2, 3, 4, 5, 6],
            &SHARED_CUSTOMERS,
            &[],
            NO_WINNER,
        ),
        scenario(
            "shared-low-score",
            "a duplicated low score does not hide the leader",
            &[100, 2, 3, 3, 4, 5],
            &SHARED_CUSTOMERS,
            &[],
            1,
        ),
        scenario(
            "top-three-away",
            "only agents below every customer remain",
            &[100, 99, 88, 3, 4, 5],
            &SHARED_CUSTOMERS,
            &[1, 3, 2],
            NO_WINNER,
        ),
        scenario(
            "bottom-three-away",
            "the lowest remaining agent absorbs most customers",
            &[100, 99, 88, 3, 4, 5],
            &SHARED_CUSTOMERS,
            &[4, 5, 6],
            3,
        ),
        scenario(
            "shared-leader",
            "the two leading agents share a score",
            &[3, 7, 7],
            &[1, 2, 3, 4, 5, 6, 7],
            &[],
            NO_WINNER,
        ),
    ]
}

/// Execute one scenario and compare against its expectation.
#[must_use]
pub fn run_scenario(scenario: &Scenario) -> ScenarioReport {
    let started = Instant::now();
    let outcome = scenario.roster.execute();
    let elapsed = started.elapsed();

    let passed = scenario
        .expected
        .is_none_or(|expected| expected == outcome.sentinel_id());

    let report = ScenarioReport {
        name: scenario.name.clone(),
        outcome,
        expected: scenario.expected,
        passed,
        elapsed,
    };

    if !report.passed {
        warn!(name = %report.name, %outcome, expected = ?report.expected, "scenario mismatch");
    }
    if report.over_budget() {
        warn!(name = %report.name, elapsed_ms = elapsed.as_millis(), "scenario over time budget");
    }
    report
}

/// Run every scenario in order.
#[must_use]
pub fn run_all(scenarios: &[Scenario]) -> Vec<ScenarioReport> {
    let reports: Vec<ScenarioReport> = scenarios.iter().map(run_scenario).collect();
    let passed = reports.iter().filter(|r| r.passed).count();
    info!(total = reports.len(), passed, "scenario run complete");
    reports
}
