//! Tracing setup shared by the `csb` and `csb-sim` binaries.
//!
//! - `CSB_LOG` takes an `EnvFilter` directive and wins over everything else.
//! - `DEBUG` (any value) or `verbose` raises the default to debug.
//! - `CSB_LOG_FORMAT=json` switches to JSON lines; anything else is compact.
//!
//! Output always goes to stderr so stdout stays parseable.

use std::env;
use std::io;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_DIRECTIVES: &str = "csb=info,warn";
const DEBUG_DIRECTIVES: &str = "csb=debug,csb_core=debug,csb_sim=debug,info";

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Compact,
        }
    }
}

fn default_directives(verbose: bool, debug_env: bool) -> &'static str {
    if verbose || debug_env {
        DEBUG_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CSB_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_directives(verbose, env::var_os("DEBUG").is_some()))
    });
    let format = LogFormat::parse(env::var("CSB_LOG_FORMAT").ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}
