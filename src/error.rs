use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Invalid argument: {name} must be positive, got {value}")]
    InvalidArgument { name: &'static str, value: usize },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Unknown image data format: {0} (expected channels_first or channels_last)")]
    UnknownDataFormat(String),

    #[error("Unknown architecture: {0} (expected shallownet or minivggnet)")]
    UnknownArchitecture(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
