use tracing::debug;

use crate::{
    config::{backend::BackendConfig, topology_config::check_dimensions},
    error::TopologyError,
    layer::factory::Layers,
    model::{input_shape::InputShape, layer_params::Padding, model::ModelDesc},
};

/// `conv(32, 3×3, same) → relu → flatten → dense(classes) → softmax`
pub fn build<B>(
    width: usize,
    height: usize,
    depth: usize,
    classes: usize,
    backend: &B,
) -> Result<ModelDesc, TopologyError>
where
    B: BackendConfig + ?Sized,
{
    check_dimensions(width, height, depth, classes)?;

    let data_format = backend.image_data_format();
    let input_shape = InputShape::new(width, height, depth, data_format);
    let mut model = ModelDesc::new("shallownet", input_shape);

    model.add_layers(vec![
        Layers::conv2d(32, 3, Padding::Same),
        Layers::relu(),
        Layers::flatten(),
        Layers::dense(classes),
        Layers::softmax(),
    ]);

    debug!(
        "Built shallownet: input {:?} ({}), {} layers",
        model.input_shape.dims(),
        data_format,
        model.len()
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::data_format::DataFormat,
        model::layer_type::{LayerKind, LayerType},
    };

    #[test]
    fn five_layers_in_fixed_order() {
        let model = build(32, 32, 3, 10, &DataFormat::ChannelsLast).unwrap();
        assert_eq!(
            model.kinds(),
            vec![
                LayerKind::Convolution,
                LayerKind::Activation,
                LayerKind::Flatten,
                LayerKind::Dense,
                LayerKind::Activation,
            ]
        );
        assert_eq!(model.input_shape.dims(), (32, 32, 3));
        assert_eq!(model.layers()[3].layer_type, LayerType::Dense { units: 10 });
        assert_eq!(model.layers()[4].layer_type, Layers::softmax());
    }

    #[test]
    fn channels_first_reorders_input() {
        let model = build(28, 24, 1, 10, &DataFormat::ChannelsFirst).unwrap();
        assert_eq!(model.input_shape.dims(), (1, 24, 28));
    }

    #[test]
    fn rejects_zero_classes() {
        let err = build(32, 32, 3, 0, &DataFormat::ChannelsLast).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidArgument { name: "classes", value: 0 }));
    }

    #[test]
    fn cifar_parameter_count() {
        let model = build(32, 32, 3, 10, &DataFormat::ChannelsLast).unwrap();
        assert_eq!(model.parameter_counts().unwrap().total(), 328_586);
    }
}
