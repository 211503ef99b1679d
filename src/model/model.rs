use serde::{Deserialize, Serialize};

use crate::{config::data_format::DataFormat, error::TopologyError};

use super::{
    input_shape::InputShape,
    layer_desc::LayerDesc,
    layer_type::{LayerKind, LayerType, ParameterCounts},
    tensor_desc::TensorDesc,
};

/// An ordered layer stack. Order is computation order and is never changed
/// once a layer has been added.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDesc {
    pub name: String,
    pub input_shape: InputShape,
    layers: Vec<LayerDesc>,
}

impl ModelDesc {
    pub fn new(name: impl Into<String>, input_shape: InputShape) -> Self {
        Self {
            name: name.into(),
            input_shape,
            layers: Vec::new(),
        }
    }

    pub fn add_layer(&mut self, layer_type: LayerType) {
        let name = self.next_layer_name(&layer_type);
        self.layers.push(LayerDesc::new(name, layer_type));
    }

    pub fn add_layers(&mut self, layer_types: Vec<LayerType>) {
        for layer_type in layer_types.into_iter() {
            self.add_layer(layer_type);
        }
    }

    // conv2d, conv2d_1, conv2d_2, ...
    fn next_layer_name(&self, layer_type: &LayerType) -> String {
        let base = layer_type.base_name();
        let seen = self
            .layers
            .iter()
            .filter(|layer| layer.layer_type.base_name() == base)
            .count();

        if seen == 0 {
            base.to_string()
        } else {
            format!("{}_{}", base, seen)
        }
    }

    pub fn layers(&self) -> &[LayerDesc] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn data_format(&self) -> DataFormat {
        self.input_shape.data_format
    }

    pub fn layer_types(&self) -> impl Iterator<Item = &LayerType> {
        self.layers.iter().map(|layer| &layer.layer_type)
    }

    pub fn kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(|layer| layer.kind()).collect()
    }

    /// Output shape of every layer, in order, with the batch axis left out.
    pub fn output_shapes(&self) -> Result<Vec<TensorDesc>, TopologyError> {
        let data_format = self.data_format();
        let mut current = self.input_shape.to_tensor_desc();
        let mut shapes = Vec::with_capacity(self.layers.len());

        for layer in &self.layers {
            current = layer.output_shape(&current, data_format)?;
            shapes.push(current.clone());
        }

        Ok(shapes)
    }

    /// Per-layer parameter counts, in order.
    pub fn layer_parameter_counts(&self) -> Result<Vec<ParameterCounts>, TopologyError> {
        let data_format = self.data_format();
        let mut current = self.input_shape.to_tensor_desc();
        let mut counts = Vec::with_capacity(self.layers.len());

        for layer in &self.layers {
            counts.push(layer.parameter_count(&current)?);
            current = layer.output_shape(&current, data_format)?;
        }

        Ok(counts)
    }

    pub fn parameter_counts(&self) -> Result<ParameterCounts, TopologyError> {
        self.layer_parameter_counts()?
            .into_iter()
            .try_fold(ParameterCounts::default(), |acc, c| acc.checked_add(c))
            .ok_or_else(|| {
                TopologyError::ShapeMismatch(format!(
                    "parameter count of '{}' overflows usize",
                    self.name
                ))
            })
    }

    pub fn to_json(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
