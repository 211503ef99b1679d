use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    config::data_format::DataFormat, error::TopologyError, layer::activations::ActivationType,
};

use super::{
    layer_params::{Conv2DParams, Padding, Pool2DParams},
    tensor_desc::TensorDesc,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum LayerType {
    #[serde(rename = "conv2d")]
    Conv2D(Conv2DParams),
    Activation(ActivationType),
    BatchNormalization { axis: i32 },
    #[serde(rename = "max_pooling2d")]
    MaxPooling2D(Pool2DParams),
    Dropout { rate: f32 },
    Flatten,
    Dense { units: usize },
}

// Parameter-free tag for comparing stacks by shape alone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Convolution,
    Activation,
    Normalization,
    Pooling,
    Dropout,
    Flatten,
    Dense,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParameterCounts {
    pub trainable: usize,
    pub non_trainable: usize,
}

impl ParameterCounts {
    // Counts handed out by this crate are checked so their total always fits
    pub fn total(&self) -> usize {
        self.trainable + self.non_trainable
    }

    pub fn checked_total(&self) -> Option<usize> {
        self.trainable.checked_add(self.non_trainable)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let sum = Self {
            trainable: self.trainable.checked_add(rhs.trainable)?,
            non_trainable: self.non_trainable.checked_add(rhs.non_trainable)?,
        };
        sum.checked_total().map(|_| sum)
    }
}

impl LayerType {
    pub fn kind(&self) -> LayerKind {
        match self {
            LayerType::Conv2D(_) => LayerKind::Convolution,
            LayerType::Activation(_) => LayerKind::Activation,
            LayerType::BatchNormalization { .. } => LayerKind::Normalization,
            LayerType::MaxPooling2D(_) => LayerKind::Pooling,
            LayerType::Dropout { .. } => LayerKind::Dropout,
            LayerType::Flatten => LayerKind::Flatten,
            LayerType::Dense { .. } => LayerKind::Dense,
        }
    }

    // Prefix for auto-generated layer names
    pub fn base_name(&self) -> &'static str {
        match self {
            LayerType::Conv2D(_) => "conv2d",
            LayerType::Activation(_) => "activation",
            LayerType::BatchNormalization { .. } => "batch_normalization",
            LayerType::MaxPooling2D(_) => "max_pooling2d",
            LayerType::Dropout { .. } => "dropout",
            LayerType::Flatten => "flatten",
            LayerType::Dense { .. } => "dense",
        }
    }

    pub fn requires_parameters(&self) -> bool {
        matches!(
            self,
            LayerType::Conv2D(_) | LayerType::BatchNormalization { .. } | LayerType::Dense { .. }
        )
    }

    pub fn config_string(&self) -> Option<String> {
        match self {
            LayerType::Conv2D(p) => Some(format!(
                "filters={}, kernel={}×{}, stride={}×{}, padding={}",
                p.filters, p.kernel_h, p.kernel_w, p.stride_h, p.stride_w, p.padding
            )),
            LayerType::Activation(a) => Some(a.name().to_string()),
            LayerType::BatchNormalization { axis } => Some(format!("axis={}", axis)),
            LayerType::MaxPooling2D(p) => Some(format!(
                "pool={}×{}, stride={}×{}",
                p.pool_h, p.pool_w, p.stride_h, p.stride_w
            )),
            LayerType::Dropout { rate } => Some(format!("rate={}", rate)),
            LayerType::Flatten => None,
            LayerType::Dense { units } => Some(format!("units={}", units)),
        }
    }

    pub fn output_shape(
        &self,
        input: &TensorDesc,
        data_format: DataFormat,
    ) -> Result<TensorDesc, TopologyError> {
        match self {
            LayerType::Conv2D(params) => conv2d_output_shape(params, input),
            LayerType::MaxPooling2D(params) => pool2d_output_shape(params, input),
            LayerType::BatchNormalization { axis } => {
                check_feature_axis(*axis, input, data_format)?;
                Ok(input.clone())
            }
            LayerType::Flatten => input
                .num_elements()
                .map(TensorDesc::new_vector)
                .ok_or_else(|| overflow("Flatten output length", input)),
            LayerType::Dense { units } => match input {
                TensorDesc::Vector { .. } => Ok(TensorDesc::new_vector(*units)),
                _ => Err(TopologyError::ShapeMismatch(format!(
                    "Dense requires a flat input, got {:?}; insert a Flatten first",
                    input
                ))),
            },
            // Activations and dropout preserve input shape
            LayerType::Activation(_) | LayerType::Dropout { .. } => Ok(input.clone()),
        }
    }

    pub fn parameter_count(&self, input: &TensorDesc) -> Result<ParameterCounts, TopologyError> {
        if !self.requires_parameters() {
            return Ok(ParameterCounts::default());
        }

        let counts = match self {
            LayerType::Conv2D(params) => {
                let in_channels = match input {
                    TensorDesc::Image { channels, .. } => *channels,
                    _ => {
                        return Err(TopologyError::ShapeMismatch(format!(
                            "Conv2D requires an image input, got {:?}",
                            input
                        )))
                    }
                };
                params
                    .kernel_h
                    .checked_mul(params.kernel_w)
                    .and_then(|n| n.checked_mul(in_channels))
                    .and_then(|n| n.checked_mul(params.filters))
                    .and_then(|weights| weights.checked_add(params.filters))
                    .map(|trainable| ParameterCounts {
                        trainable,
                        non_trainable: 0,
                    })
            }
            LayerType::Dense { units } => {
                let in_features = match input {
                    TensorDesc::Vector { length } => *length,
                    _ => {
                        return Err(TopologyError::ShapeMismatch(format!(
                            "Dense requires a flat input, got {:?}",
                            input
                        )))
                    }
                };
                in_features
                    .checked_mul(*units)
                    .and_then(|weights| weights.checked_add(*units))
                    .map(|trainable| ParameterCounts {
                        trainable,
                        non_trainable: 0,
                    })
            }
            LayerType::BatchNormalization { .. } => {
                let features = match input {
                    TensorDesc::Image { channels, .. } => *channels,
                    TensorDesc::Vector { length } => *length,
                };
                // gamma and beta train; the moving mean and variance do not
                features.checked_mul(2).map(|half| ParameterCounts {
                    trainable: half,
                    non_trainable: half,
                })
            }
            _ => Some(ParameterCounts::default()),
        };

        counts
            .filter(|c| c.checked_total().is_some())
            .ok_or_else(|| overflow(&format!("{} parameter count", self), input))
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerType::Conv2D(_) => f.write_str("Conv2D"),
            LayerType::Activation(_) => f.write_str("Activation"),
            LayerType::BatchNormalization { .. } => f.write_str("BatchNormalization"),
            LayerType::MaxPooling2D(_) => f.write_str("MaxPooling2D"),
            LayerType::Dropout { .. } => f.write_str("Dropout"),
            LayerType::Flatten => f.write_str("Flatten"),
            LayerType::Dense { .. } => f.write_str("Dense"),
        }
    }
}

fn conv2d_output_shape(
    params: &Conv2DParams,
    input: &TensorDesc,
) -> Result<TensorDesc, TopologyError> {
    let (height, width) = match input {
        TensorDesc::Image { height, width, .. } => (*height, *width),
        _ => {
            return Err(TopologyError::ShapeMismatch(format!(
                "Conv2D requires an image input, got {:?}",
                input
            )))
        }
    };

    check_window(params.kernel_h, params.kernel_w, "kernel", "Conv2D")?;
    check_window(params.stride_h, params.stride_w, "stride", "Conv2D")?;

    let (h_out, w_out) = match params.padding {
        Padding::Same => (height.div_ceil(params.stride_h), width.div_ceil(params.stride_w)),
        Padding::Valid => (
            window_count(height, params.kernel_h, params.stride_h, "Conv2D")?,
            window_count(width, params.kernel_w, params.stride_w, "Conv2D")?,
        ),
    };

    Ok(TensorDesc::new_image(params.filters, h_out, w_out))
}

fn pool2d_output_shape(
    params: &Pool2DParams,
    input: &TensorDesc,
) -> Result<TensorDesc, TopologyError> {
    check_window(params.pool_h, params.pool_w, "pool size", "MaxPooling2D")?;
    check_window(params.stride_h, params.stride_w, "stride", "MaxPooling2D")?;

    match input {
        TensorDesc::Image { channels, height, width } => Ok(TensorDesc::new_image(
            *channels,
            window_count(*height, params.pool_h, params.stride_h, "MaxPooling2D")?,
            window_count(*width, params.pool_w, params.stride_w, "MaxPooling2D")?,
        )),
        _ => Err(TopologyError::ShapeMismatch(format!(
            "MaxPooling2D requires an image input, got {:?}",
            input
        ))),
    }
}

fn check_window(h: usize, w: usize, what: &str, layer: &str) -> Result<(), TopologyError> {
    if h == 0 || w == 0 {
        return Err(TopologyError::ShapeMismatch(format!(
            "{} {} must be positive, got {}×{}",
            layer, what, h, w
        )));
    }
    Ok(())
}

fn overflow(what: &str, input: &TensorDesc) -> TopologyError {
    TopologyError::ShapeMismatch(format!("{} for {:?} overflows usize", what, input))
}

// Number of full windows of `size` that fit along `extent`
fn window_count(
    extent: usize,
    size: usize,
    stride: usize,
    layer: &str,
) -> Result<usize, TopologyError> {
    if extent < size {
        return Err(TopologyError::ShapeMismatch(format!(
            "{} window of {} does not fit in a dimension of {}",
            layer, size, extent
        )));
    }
    Ok((extent - size) / stride + 1)
}

fn check_feature_axis(
    axis: i32,
    input: &TensorDesc,
    data_format: DataFormat,
) -> Result<(), TopologyError> {
    let rank = input.rank() as i32;
    let resolved = if axis < 0 { axis + rank } else { axis };

    let feature_axis = match (input, data_format) {
        (TensorDesc::Vector { .. }, _) => 1,
        (TensorDesc::Image { .. }, DataFormat::ChannelsFirst) => 1,
        (TensorDesc::Image { .. }, DataFormat::ChannelsLast) => rank - 1,
    };

    if resolved != feature_axis {
        return Err(TopologyError::ShapeMismatch(format!(
            "BatchNormalization axis {} does not address the feature axis of {:?} ({})",
            axis, input, data_format
        )));
    }
    Ok(())
}
