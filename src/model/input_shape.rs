use serde::{Deserialize, Serialize};

use crate::config::data_format::DataFormat;

use super::tensor_desc::TensorDesc;

/// Geometry of a single input image, tied to the layout it was resolved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputShape {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub data_format: DataFormat,
}

impl InputShape {
    pub fn new(width: usize, height: usize, depth: usize, data_format: DataFormat) -> Self {
        Self {
            width,
            height,
            depth,
            data_format,
        }
    }

    /// The ordered triple the backend expects: `(height, width, depth)` for
    /// channels-last, `(depth, height, width)` for channels-first.
    pub fn dims(&self) -> (usize, usize, usize) {
        match self.data_format {
            DataFormat::ChannelsLast => (self.height, self.width, self.depth),
            DataFormat::ChannelsFirst => (self.depth, self.height, self.width),
        }
    }

    pub fn to_tensor_desc(&self) -> TensorDesc {
        TensorDesc::new_image(self.depth, self.height, self.width)
    }
}
