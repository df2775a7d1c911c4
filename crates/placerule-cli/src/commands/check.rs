//! Check command
//!
//! Usage: placerule check <RULES> [--all]

use clap::Args;
use placerule_core::errors::ExError;
use placerule_core::rules::validation::{collect_violations, validate_rules};
use placerule_core::PlacementPolicy;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Current rules (JSON array)
    pub rules: PathBuf,

    /// Report every violating rule instead of stopping at the first
    #[arg(long)]
    pub all: bool,
}

/// Execute check command
pub fn execute(
    args: CheckArgs,
    policy: &PlacementPolicy,
) -> Result<(), ExError> {
    let rules = super::load_rules(&args.rules)?;

    if args.all {
        let violations = collect_violations(&rules, policy);
        if !violations.is_empty() {
            for violation in &violations {
                eprintln!("{}", violation);
            }
            let first = ExError::from(&violations[0].error);
            return Err(ExError::new(first.kind()).with_message(format!(
                "{} of {} rules failed validation",
                violations.len(),
                rules.len()
            )));
        }
    } else {
        validate_rules(&rules, policy)?;
    }

    println!("check done, all rules has {} constraints", policy.exclusion_key);
    Ok(())
}
