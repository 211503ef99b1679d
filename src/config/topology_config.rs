use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub classes: usize,
    // Ignored by architectures without normalization layers
    pub batch_norm: bool,
}

impl TopologyConfig {
    pub fn new(width: usize, height: usize, depth: usize, classes: usize) -> Self {
        Self {
            width,
            height,
            depth,
            classes,
            ..Default::default()
        }
    }

    pub fn build(self) -> Result<Self, TopologyError> {
        check_dimensions(self.width, self.height, self.depth, self.classes)?;

        Ok(self)
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            depth: 3,
            classes: 10,
            batch_norm: true,
        }
    }
}

pub(crate) fn check_dimensions(
    width: usize,
    height: usize,
    depth: usize,
    classes: usize,
) -> Result<(), TopologyError> {
    let named = [("width", width), ("height", height), ("depth", depth), ("classes", classes)];
    for (name, value) in named {
        if value == 0 {
            return Err(TopologyError::InvalidArgument { name, value });
        }
    }
    Ok(())
}
