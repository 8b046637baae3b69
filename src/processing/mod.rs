pub mod assemble;
pub mod grouping;
pub mod range;
pub mod segmentation;
pub mod statistics;

use thiserror::Error;

/// Invalid analysis configuration. Computation refuses to start until
/// the caller fixes the offending group or parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("column group is empty; add at least one column index")]
    EmptyGroup,
    #[error("invalid value {value} for {name}: {requirement}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}
