//! Configuration errors
//!
//! The simulation itself never fails mid-round; everything that can go wrong
//! is caught when settings are validated or a round is created.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a {width}x{height} grid has no free cell once {excluded} cell(s) are excluded")]
    GridTooSmall {
        width: u32,
        height: u32,
        excluded: usize,
    },
    #[error("grid dimension {0} does not fit in a grid coordinate")]
    GridTooLarge(u32),
    #[error("input queue capacity must be at least 1")]
    ZeroQueueCapacity,
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("target deliveries must be at least 1")]
    ZeroTargetDeliveries,
    #[error("invalid settings json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
