//! placerule CLI
//!
//! Validates placement rule documents and derives the keyspace-scoped
//! write-region rules (or their withdrawal) for an operator to apply.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use placerule_core::errors::ExError;
use placerule_core::logging_facility::{self, Profile};
use placerule_core_types::RunId;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "placerule")]
#[command(about = "placerule - Placement rule validation and rewrite", long_about = None)]
struct Cli {
    /// Placement policy TOML file (built-in defaults when omitted)
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Log output format on stderr (human, json)
    #[arg(long, global = true, default_value = "human")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that every rule excludes write nodes
    Check(commands::check::CheckArgs),
    /// Derive write-region rules for one keyspace
    Enable(commands::enable::EnableArgs),
    /// Derive the document that withdraws enabled rules
    Delete(commands::delete::DeleteArgs),
}

impl Commands {
    fn op(&self) -> &'static str {
        match self {
            Commands::Check(_) => "check",
            Commands::Enable(_) => "enable",
            Commands::Delete(_) => "delete",
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let run_id = RunId::new();
    let span = tracing::info_span!("placerule", run_id = %run_id);
    let _guard = span.enter();

    let op = cli.command.op();
    if let Err(e) = run(cli) {
        let e = e.with_op(op).with_run_id(run_id.clone());
        tracing::error!(
            err_code = e.code(),
            invariant_violation = e.kind().is_invariant_violation(),
            rule_id = e.rule_id().unwrap_or_default(),
            "{}",
            e
        );
        eprintln!("Error: {}", e.message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ExError> {
    let policy = commands::load_policy(cli.policy.as_deref())?;

    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &policy),
        Commands::Enable(args) => commands::enable::execute(args, &policy),
        Commands::Delete(args) => commands::delete::execute(args, &policy),
    }
}
