//! Subcommands and the file loading they share

use std::path::Path;

use placerule_core::errors::PlaceRuleError;
use placerule_core::model::parse_rules;
use placerule_core::{PlacementPolicy, Rule};

pub mod check;
pub mod delete;
pub mod enable;

fn read_file(path: &Path) -> Result<String, PlaceRuleError> {
    std::fs::read_to_string(path).map_err(|e| PlaceRuleError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load the rule document at `path`
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, PlaceRuleError> {
    let content = read_file(path)?;
    parse_rules(&content).map_err(|e| PlaceRuleError::InvalidInput {
        reason: format!("{}: {}", path.display(), e),
    })
}

/// Load the policy file, or the built-in policy when none is given
pub fn load_policy(path: Option<&Path>) -> Result<PlacementPolicy, PlaceRuleError> {
    match path {
        Some(path) => PlacementPolicy::from_toml_str(&read_file(path)?),
        None => Ok(PlacementPolicy::default()),
    }
}
