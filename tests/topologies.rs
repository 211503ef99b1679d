use std::sync::atomic::{AtomicUsize, Ordering};

use convnet_topology::{
    layer::activations::ActivationType, minivggnet, model::print_model_stats::format_model_stats,
    shallownet, Architecture, BackendConfig, DataFormat, LayerKind, LayerType, ModelDesc,
    TensorDesc, TopologyConfig, TopologyError,
};
use rayon::prelude::*;

// Flips layout on every query, so a builder that asked twice or cached an
// answer across calls would show up as an inconsistent model.
struct AlternatingBackend {
    queries: AtomicUsize,
}

impl BackendConfig for AlternatingBackend {
    fn image_data_format(&self) -> DataFormat {
        match self.queries.fetch_add(1, Ordering::SeqCst) % 2 {
            0 => DataFormat::ChannelsFirst,
            _ => DataFormat::ChannelsLast,
        }
    }
}

fn bn_axes(model: &ModelDesc) -> Vec<i32> {
    model
        .layer_types()
        .filter_map(|t| match t {
            LayerType::BatchNormalization { axis } => Some(*axis),
            _ => None,
        })
        .collect()
}

#[test]
fn shallownet_cifar_channels_last() {
    let model = shallownet::build(32, 32, 3, 10, &DataFormat::ChannelsLast).unwrap();

    assert_eq!(model.input_shape.dims(), (32, 32, 3));
    assert_eq!(model.len(), 5);
    let tail: Vec<&LayerType> = model.layer_types().skip(3).collect();
    assert_eq!(
        tail,
        vec![&LayerType::Dense { units: 10 }, &LayerType::Activation(ActivationType::Softmax)]
    );
}

#[test]
fn minivggnet_full_sequence() {
    use LayerKind::*;

    let model = minivggnet::build(32, 32, 3, 10, true, &DataFormat::ChannelsLast).unwrap();
    let block = [
        Convolution,
        Activation,
        Normalization,
        Convolution,
        Activation,
        Normalization,
        Pooling,
        Dropout,
    ];
    let head = [Flatten, Dense, Activation, Normalization, Dropout, Dense, Activation];
    let expected: Vec<LayerKind> =
        block.iter().chain(block.iter()).chain(head.iter()).copied().collect();

    assert_eq!(model.kinds(), expected);
    assert_eq!(model.layers()[6].layer_type.kind(), Pooling);
    assert_eq!(model.layers().last().unwrap().layer_type.to_string(), "Activation");
}

#[test]
fn minivggnet_shapes_on_cifar() {
    let model = minivggnet::build(32, 32, 3, 10, true, &DataFormat::ChannelsFirst).unwrap();
    let shapes = model.output_shapes().unwrap();

    assert_eq!(shapes[0], TensorDesc::new_image(32, 32, 32));
    assert_eq!(shapes[6], TensorDesc::new_image(32, 16, 16));
    assert_eq!(shapes[14], TensorDesc::new_image(64, 8, 8));
    assert_eq!(shapes[16], TensorDesc::new_vector(4096));
    assert_eq!(shapes[17], TensorDesc::new_vector(512));
    assert_eq!(shapes.last(), Some(&TensorDesc::new_vector(10)));
}

#[test]
fn builds_are_deterministic() {
    let a = minivggnet::build(64, 48, 1, 7, true, &DataFormat::ChannelsLast).unwrap();
    let b = minivggnet::build(64, 48, 1, 7, true, &DataFormat::ChannelsLast).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn layout_is_resolved_once_per_build() {
    let backend = AlternatingBackend { queries: AtomicUsize::new(0) };

    let first = minivggnet::build(32, 32, 3, 10, true, &backend).unwrap();
    let second = minivggnet::build(32, 32, 3, 10, true, &backend).unwrap();

    assert_eq!(backend.queries.load(Ordering::SeqCst), 2);

    assert_eq!(first.data_format(), DataFormat::ChannelsFirst);
    assert_eq!(first.input_shape.dims(), (3, 32, 32));
    assert_eq!(bn_axes(&first), vec![1; 5]);

    assert_eq!(second.data_format(), DataFormat::ChannelsLast);
    assert_eq!(second.input_shape.dims(), (32, 32, 3));
    assert_eq!(bn_axes(&second), vec![-1; 5]);

    // Both are internally consistent
    assert!(first.output_shapes().is_ok());
    assert!(second.output_shapes().is_ok());
}

#[test]
fn concurrent_builds_match_sequential_ones() {
    let reference = minivggnet::build(32, 32, 3, 10, true, &DataFormat::ChannelsLast).unwrap();

    let models: Vec<ModelDesc> = (0..64)
        .into_par_iter()
        .map(|_| minivggnet::build(32, 32, 3, 10, true, &DataFormat::ChannelsLast).unwrap())
        .collect();

    assert!(models.iter().all(|m| *m == reference));
}

#[test]
fn invalid_arguments_fail_fast() {
    for (w, h, d, c) in [(0, 32, 3, 10), (32, 0, 3, 10), (32, 32, 0, 10), (32, 32, 3, 0)] {
        assert!(matches!(
            shallownet::build(w, h, d, c, &DataFormat::ChannelsLast),
            Err(TopologyError::InvalidArgument { value: 0, .. })
        ));
        assert!(matches!(
            minivggnet::build(w, h, d, c, false, &DataFormat::ChannelsLast),
            Err(TopologyError::InvalidArgument { value: 0, .. })
        ));
    }
}

#[test]
fn huge_geometry_builds_but_inference_reports_overflow() {
    let model = shallownet::build(1 << 30, 1 << 30, 3, 10, &DataFormat::ChannelsLast).unwrap();

    assert!(matches!(model.output_shapes(), Err(TopologyError::ShapeMismatch(_))));
    assert!(matches!(model.parameter_counts(), Err(TopologyError::ShapeMismatch(_))));
    assert!(format_model_stats(&model).is_err());
}

#[test]
fn architecture_registry_and_summary() {
    let config = TopologyConfig::new(28, 28, 1, 10).build().unwrap();
    let arch: Architecture = "shallownet".parse().unwrap();
    let model = arch.build(&config, &DataFormat::ChannelsLast).unwrap();

    let summary = format_model_stats(&model).unwrap();
    assert!(summary.contains("Model: \"shallownet\""));
    // 3*3*1*32+32 + 28*28*32*10+10
    assert!(summary.contains("Total params: 251,210"));
}
