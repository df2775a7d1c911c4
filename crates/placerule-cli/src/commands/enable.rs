//! Enable command
//!
//! Usage: placerule enable <RULES> <KEYSPACE>

use clap::Args;
use placerule_core::errors::ExError;
use placerule_core::model::enabled_document;
use placerule_core::transform::enable_write_region;
use placerule_core::{KeyspaceScope, PlacementPolicy};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EnableArgs {
    /// Current rules (JSON array)
    pub rules: PathBuf,

    /// Keyspace whose rules are rewritten
    pub keyspace: String,
}

/// Execute enable command
pub fn execute(
    args: EnableArgs,
    policy: &PlacementPolicy,
) -> Result<(), ExError> {
    let scope = KeyspaceScope::new(args.keyspace)?;
    let rules = super::load_rules(&args.rules)?;

    let enabled = enable_write_region(&rules, &scope, policy)?;
    println!("{}", enabled_document(&enabled)?);

    Ok(())
}
