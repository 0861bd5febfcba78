//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic parsing. Returns all
//! validation errors, not just the first, so a broken config can be fixed
//! in one pass.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::AggregatorConfig;
use crate::registry::types::Network;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate network id '{0}'")]
    DuplicateNetworkId(String),

    #[error("network '{id}': {reason}")]
    Network { id: String, reason: String },

    #[error("fetch.{0} must be at least 1")]
    ZeroField(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AggregatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for net in &config.networks {
        if !seen.insert(net.id.as_str()) {
            errors.push(ValidationError::DuplicateNetworkId(net.id.clone()));
        }
        if let Err(reason) = Network::from_config(net) {
            errors.push(ValidationError::Network {
                id: net.id.clone(),
                reason,
            });
        }
    }

    let fetch = &config.fetch;
    for (field, ok) in [
        ("max_retries", fetch.max_retries >= 1),
        ("count_timeout_secs", fetch.count_timeout_secs >= 1),
        ("batch_timeout_secs", fetch.batch_timeout_secs >= 1),
        ("chunk_size", fetch.chunk_size >= 1),
    ] {
        if !ok {
            errors.push(ValidationError::ZeroField(field));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
