use std::env;

use tracing::warn;

use super::data_format::DataFormat;

pub const IMAGE_DATA_FORMAT_VAR: &str = "IMAGE_DATA_FORMAT";

/// The numeric backend's view of how image tensors are laid out.
///
/// Builders query this once per call and never cache the answer, so a caller
/// can hand different backends to different builds in the same process.
pub trait BackendConfig {
    fn image_data_format(&self) -> DataFormat;
}

impl BackendConfig for DataFormat {
    fn image_data_format(&self) -> DataFormat {
        *self
    }
}

/// Reads the layout from an environment variable on every query.
#[derive(Clone, Debug)]
pub struct EnvBackend {
    var: String,
}

impl EnvBackend {
    pub fn new() -> Self {
        Self::new_with(IMAGE_DATA_FORMAT_VAR)
    }

    pub fn new_with(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BackendConfig for EnvBackend {
    fn image_data_format(&self) -> DataFormat {
        match env::var(&self.var) {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                warn!("{}, falling back to {}", e, DataFormat::default());
                DataFormat::default()
            }),
            Err(_) => DataFormat::default(),
        }
    }
}
