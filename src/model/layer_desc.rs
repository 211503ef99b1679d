use serde::{Deserialize, Serialize};

use crate::{config::data_format::DataFormat, error::TopologyError};

use super::{
    layer_type::{LayerKind, LayerType, ParameterCounts},
    tensor_desc::TensorDesc,
};

/// One entry of a topology: a layer type under a name unique to its model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerDesc {
    pub name: String,
    pub layer_type: LayerType,
}

impl LayerDesc {
    pub fn new(name: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            name: name.into(),
            layer_type,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.layer_type.kind()
    }

    pub fn output_shape(
        &self,
        input_shape: &TensorDesc,
        data_format: DataFormat,
    ) -> Result<TensorDesc, TopologyError> {
        self.layer_type
            .output_shape(input_shape, data_format)
            .map_err(|e| match e {
                TopologyError::ShapeMismatch(msg) => {
                    TopologyError::ShapeMismatch(format!("layer '{}': {}", self.name, msg))
                }
                other => other,
            })
    }

    pub fn parameter_count(
        &self,
        input_shape: &TensorDesc,
    ) -> Result<ParameterCounts, TopologyError> {
        self.layer_type.parameter_count(input_shape)
    }

    // e.g. `conv2d_1 (Conv2D)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.layer_type)
    }
}
