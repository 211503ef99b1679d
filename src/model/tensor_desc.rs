use serde::{Deserialize, Serialize};

use crate::config::data_format::DataFormat;

// Per-sample shapes; the batch dimension is left implicit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensorDesc {
    // Output of flatten and dense layers
    Vector { length: usize },

    // Feature maps, independent of how the backend orders them in memory
    Image {
        channels: usize,
        height: usize,
        width: usize,
    },
}

impl TensorDesc {
    pub fn new_vector(length: usize) -> Self {
        Self::Vector { length }
    }

    pub fn new_image(channels: usize, height: usize, width: usize) -> Self {
        Self::Image { channels, height, width }
    }

    // None when the element count does not fit in usize
    pub fn num_elements(&self) -> Option<usize> {
        match &self {
            Self::Vector { length } => Some(*length),
            Self::Image { channels, height, width } => {
                channels.checked_mul(*height)?.checked_mul(*width)
            }
        }
    }

    // Rank including the batch axis
    pub fn rank(&self) -> usize {
        match &self {
            Self::Vector { .. } => 2,
            Self::Image { .. } => 4,
        }
    }

    pub fn to_dims(&self, data_format: DataFormat) -> Vec<usize> {
        match (&self, data_format) {
            (Self::Vector { length }, _) => vec![*length],
            (Self::Image { channels, height, width }, DataFormat::ChannelsFirst) => {
                vec![*channels, *height, *width]
            }
            (Self::Image { channels, height, width }, DataFormat::ChannelsLast) => {
                vec![*height, *width, *channels]
            }
        }
    }

    // Keras-style rendering, e.g. `(None, 32, 32, 3)`
    pub fn format_with_batch(&self, data_format: DataFormat) -> String {
        let dims = self
            .to_dims(data_format)
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("(None, {})", dims)
    }
}
