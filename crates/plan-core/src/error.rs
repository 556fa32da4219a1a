// File: crates/plan-core/src/error.rs
// Summary: Error type for plan construction, validation and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Error, Debug)]
pub enum PlanError {
    /// A task was built without a role identifier.
    #[error("task '{label}' has no role")]
    MissingRole { label: String },

    /// Interval bounds are not finite or do not enclose a positive length.
    #[error("task '{label}' has invalid interval [{start}, {end})")]
    InvalidInterval { label: String, start: f64, end: f64 },

    #[error("task '{label}' has invalid weight {weight}")]
    InvalidWeight { label: String, weight: f64 },

    /// Task role missing from the plan's role order.
    #[error("task '{label}' uses role '{role}' which is not in the role order")]
    UnknownRole { label: String, role: String },

    #[error("milestone '{id}' is invalid: {reason}")]
    InvalidMilestone { id: String, reason: &'static str },

    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
