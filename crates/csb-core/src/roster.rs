//! Roster and scenario files.
//!
//! A scenario file lists the agents, customers, and away ids for one run and
//! may declare the expected winner (`0` for "no unique winner"). TOML and
//! JSON are accepted; the format follows the file extension.
//!
//! ```toml
//! name = "two agents away"
//! away = [2, 4]
//! expected = 1
//!
//! [[agents]]
//! id = 1
//! score = 60
//!
//! [[customers]]
//! id = 1
//! score = 90
//! ```
//!
//! Records without an `id` or `score` are rejected at parse time.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::balance::{Allocation, Balancer, Outcome};
use crate::error::RosterError;
use crate::model::{Agent, AgentId, AwaySet, Customer};

/// The three inputs of a balancing run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster<S = u32> {
    pub agents: Vec<Agent<S>>,
    pub customers: Vec<Customer<S>>,
    #[serde(default)]
    pub away: AwaySet,
}

impl<S: Ord> Roster<S> {
    /// Check agent ids: unique and never the sentinel `0`.
    ///
    /// Away ids that match no agent are tolerated and logged.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::ReservedAgentId`] or
    /// [`RosterError::DuplicateAgentId`].
    pub fn validate(&self) -> Result<(), RosterError> {
        let mut seen: HashSet<AgentId> = HashSet::with_capacity(self.agents.len());
        for agent in &self.agents {
            if agent.id == 0 {
                return Err(RosterError::ReservedAgentId);
            }
            if !seen.insert(agent.id) {
                return Err(RosterError::DuplicateAgentId(agent.id));
            }
        }

        for id in self.away.iter().filter(|id| !seen.contains(*id)) {
            warn!(agent = *id, "away id does not match any agent");
        }
        Ok(())
    }

    #[must_use]
    pub fn balancer(&self) -> Balancer<'_, S> {
        Balancer::new(&self.agents, &self.customers, &self.away)
    }

    #[must_use]
    pub fn execute(&self) -> Outcome {
        self.balancer().execute()
    }
}

impl<S: Ord + Clone> Roster<S> {
    #[must_use]
    pub fn allocate(&self) -> Allocation<S> {
        self.balancer().allocate()
    }
}

/// A named roster with an optional expected winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario<S = u32> {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub roster: Roster<S>,
    /// Expected winner id; `0` means no unique winner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<AgentId>,
}

/// Scenario file encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Toml,
    Json,
}

impl ScenarioFormat {
    /// Pick the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::UnsupportedFormat`] for anything other than
    /// `.toml` or `.json`.
    pub fn from_path(path: &Path) -> Result<Self, RosterError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            other => Err(RosterError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Parse a scenario from text.
///
/// # Errors
///
/// Returns [`RosterError::Parse`] on malformed input or missing fields, and
/// any validation error from [`Roster::validate`].
pub fn parse_scenario(text: &str, format: ScenarioFormat) -> Result<Scenario, RosterError> {
    let scenario: Scenario = match format {
        ScenarioFormat::Toml => toml::from_str(text)?,
        ScenarioFormat::Json => serde_json::from_str(text)?,
    };
    scenario.roster.validate()?;
    debug!(
        name = %scenario.name,
        agents = scenario.roster.agents.len(),
        customers = scenario.roster.customers.len(),
        "scenario parsed"
    );
    Ok(scenario)
}

/// Read and validate a scenario file.
///
/// # Errors
///
/// Returns [`RosterError::Io`] when the file cannot be read, otherwise the
/// errors of [`ScenarioFormat::from_path`] and [`parse_scenario`].
pub fn load_scenario(path: &Path) -> Result<Scenario, RosterError> {
    let format = ScenarioFormat::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENARIO_TOML: &str = r#"
name = "two agents away"
away = [2, 4]
expected = 1

[[agents]]
id = 1
score = 60

[[agents]]
id = 2
score = 20

[[agents]]
id = 3
score = 95

[[agents]]
id = 4
score = 75

[[customers]]
id = 1
score = 90

[[customers]]
id = 2
score = 20

[[customers]]
id = 3
score = 70

[[customers]]
id = 4
score = 40

[[customers]]
id = 5
score = 60

[[customers]]
id = 6
score = 10
"#;

    #[test]
    fn toml_scenario_round_trips_to_outcome() {
        let scenario = parse_scenario(SCENARIO_TOML, ScenarioFormat::Toml).expect("valid toml");
        assert_eq!(scenario.name, "two agents away");
        assert_eq!(scenario.expected, Some(1));
        assert_eq!(scenario.roster.execute(), Outcome::Winner(1));
    }

    #[test]
    fn json_scenario_without_away_defaults_to_empty() {
        let text = r#"{
            "name": "solo",
            "agents": [{"id": 1, "score": 10}],
            "customers": [{"id": 1, "score": 5}]
        }"#;
        let scenario = parse_scenario(text, ScenarioFormat::Json).expect("valid json");
        assert!(scenario.roster.away.is_empty());
        assert_eq!(scenario.expected, None);
        assert_eq!(scenario.roster.execute(), Outcome::Winner(1));
    }

    #[test]
    fn missing_score_is_a_parse_error() {
        let text = r#"{"name": "broken", "agents": [{"id": 1}], "customers": []}"#;
        let err = parse_scenario(text, ScenarioFormat::Json).expect_err("score missing");
        assert!(matches!(err, RosterError::Parse { .. }), "got {err}");
    }

    #[test]
    fn duplicate_agent_id_is_rejected() {
        let roster = Roster {
            agents: vec![Agent::new(1, 10), Agent::new(1, 20)],
            customers: vec![],
            away: AwaySet::new(),
        };
        assert!(matches!(
            roster.validate(),
            Err(RosterError::DuplicateAgentId(1))
        ));
    }

    #[test]
    fn sentinel_agent_id_is_rejected() {
        let roster = Roster {
            agents: vec![Agent::new(0, 10)],
            customers: vec![Customer::new(1, 5)],
            away: AwaySet::new(),
        };
        assert!(matches!(roster.validate(), Err(RosterError::ReservedAgentId)));
    }

    #[test]
    fn unknown_away_id_is_tolerated() {
        let roster = Roster {
            agents: vec![Agent::new(1, 10)],
            customers: vec![],
            away: [42].into_iter().collect(),
        };
        assert!(roster.validate().is_ok());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ScenarioFormat::from_path(Path::new("a/b.TOML")).expect("toml"),
            ScenarioFormat::Toml
        );
        assert!(matches!(
            ScenarioFormat::from_path(Path::new("roster.yaml")),
            Err(RosterError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }

    #[test]
    fn load_scenario_reads_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(SCENARIO_TOML.as_bytes()).expect("write");

        let scenario = load_scenario(file.path()).expect("load");
        assert_eq!(scenario.roster.agents.len(), 4);
        assert_eq!(scenario.roster.customers.len(), 6);
    }

    #[test]
    fn load_scenario_reports_missing_file() {
        let err = load_scenario(Path::new("/nonexistent/roster.json")).expect_err("missing");
        assert!(matches!(err, RosterError::Io { .. }));
    }
}
