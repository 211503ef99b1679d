use tracing::debug;

use crate::{
    config::{backend::BackendConfig, topology_config::check_dimensions},
    error::TopologyError,
    layer::factory::Layers,
    model::{input_shape::InputShape, layer_params::Padding, model::ModelDesc},
};

/// Two `(conv → relu → [bn]) × 2 → pool → dropout` blocks of 32 and 64 filters,
/// then `flatten → dense(512) → relu → [bn] → dropout → dense(classes) → softmax`.
///
/// The `[bn]` layers are present only when `batch_norm` is set. Their axis
/// follows the backend's channel position.
pub fn build<B>(
    width: usize,
    height: usize,
    depth: usize,
    classes: usize,
    batch_norm: bool,
    backend: &B,
) -> Result<ModelDesc, TopologyError>
where
    B: BackendConfig + ?Sized,
{
    check_dimensions(width, height, depth, classes)?;

    let data_format = backend.image_data_format();
    let chan_dim = data_format.channel_axis();
    let input_shape = InputShape::new(width, height, depth, data_format);
    let mut model = ModelDesc::new("minivggnet", input_shape);

    let activate = |model: &mut ModelDesc| {
        model.add_layer(Layers::relu());
        if batch_norm {
            model.add_layer(Layers::batch_norm(chan_dim));
        }
    };

    for filters in [32, 64] {
        model.add_layer(Layers::conv2d(filters, 3, Padding::Same));
        activate(&mut model);
        model.add_layer(Layers::conv2d(filters, 3, Padding::Same));
        activate(&mut model);
        model.add_layers(vec![Layers::max_pool2d(2), Layers::dropout(0.25)]);
    }

    model.add_layers(vec![Layers::flatten(), Layers::dense(512)]);
    activate(&mut model);
    model.add_layers(vec![Layers::dropout(0.5), Layers::dense(classes), Layers::softmax()]);

    debug!(
        "Built minivggnet: input {:?} ({}), batch_norm={}, {} layers",
        model.input_shape.dims(),
        data_format,
        batch_norm,
        model.len()
    );

    Ok(model)
}
