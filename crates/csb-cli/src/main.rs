#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use csb_sim::init_tracing;
use output::OutputMode;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "csb: find the customer success agent serving the most customers",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (same as DEBUG=1).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Balance a roster from a scenario file",
        long_about = "Load agents, customers, and away ids from a TOML or JSON scenario file \
                      and report the agent serving the most customers (0 when there is no \
                      unique winner).",
        after_help = "EXAMPLES:\n    # Balance a roster\n    csb run roster.toml\n\n    \
                      # Show per-agent counts\n    csb run roster.toml --explain\n\n    \
                      # Emit machine-readable output\n    csb run roster.json --json"
    )]
    Run(cmd::run::RunArgs),

    #[command(
        about = "Balance score lists given on the command line",
        after_help = "EXAMPLES:\n    csb inline --agents 60,20,95,75 --customers 90,20,70,40,60,10 --away 2,4"
    )]
    Inline(cmd::inline::InlineArgs),

    #[command(
        about = "Run the built-in reference scenarios",
        after_help = "EXAMPLES:\n    csb scenarios\n    csb scenarios --filter tie --json"
    )]
    Scenarios(cmd::scenarios::ScenariosArgs),

    #[command(about = "Randomized campaigns against the reference balancer")]
    Sim(cmd::sim::SimArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(command = ?cli.command, "starting");

    let output = OutputMode::from_json_flag(cli.json);

    match &cli.command {
        Commands::Run(args) => cmd::run::run_run(args, output),
        Commands::Inline(args) => cmd::inline::run_inline(args, output),
        Commands::Scenarios(args) => cmd::scenarios::run_scenarios(args, output),
        Commands::Sim(args) => match &args.command {
            cmd::sim::SimCommand::Run(run) => cmd::sim::run_sim_run(run, output),
            cmd::sim::SimCommand::Replay(replay) => cmd::sim::run_sim_replay(replay, output),
        },
    }
}
