//! Delete command
//!
//! Usage: placerule delete <RULES>

use clap::Args;
use placerule_core::errors::ExError;
use placerule_core::model::retired_document;
use placerule_core::transform::retire_rules;
use placerule_core::PlacementPolicy;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Rules to withdraw (JSON array)
    pub rules: PathBuf,
}

/// Execute delete command
pub fn execute(
    args: DeleteArgs,
    policy: &PlacementPolicy,
) -> Result<(), ExError> {
    let rules = super::load_rules(&args.rules)?;

    let retired = retire_rules(&rules, policy);
    println!("{}", retired_document(&retired)?);

    Ok(())
}
