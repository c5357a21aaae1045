//! `csb inline` — balance rosters given as score lists on the command line.

use anyhow::Result;
use clap::Args;
use csb_core::{AgentId, Roster, Scenario, agents_from_scores, customers_from_scores};

use super::run::report;
use crate::output::OutputMode;

#[derive(Args, Debug)]
pub struct InlineArgs {
    /// Agent scores; agent ids are assigned 1, 2, 3, ... in order.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub agents: Vec<u32>,

    /// Customer scores; customer ids are assigned 1, 2, 3, ... in order.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub customers: Vec<u32>,

    /// Ids of agents that are away.
    #[arg(long, value_delimiter = ',')]
    pub away: Vec<AgentId>,

    /// Expected winner id (0 for none); mismatches exit non-zero.
    #[arg(long)]
    pub expect: Option<AgentId>,

    /// Print the per-agent breakdown.
    #[arg(long)]
    pub explain: bool,
}

impl InlineArgs {
    #[must_use]
    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            name: "inline".to_string(),
            description: None,
            roster: Roster {
                agents: agents_from_scores(&self.agents),
                customers: customers_from_scores(&self.customers),
                away: self.away.iter().copied().collect(),
            },
            expected: self.expect,
        }
    }
}

/// Execute `csb inline`.
pub fn run_inline(args: &InlineArgs, output: OutputMode) -> Result<()> {
    report(&args.to_scenario(), args.explain, output)
}
