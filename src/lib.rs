//! Layer-stack descriptions for two small image classifiers, ShallowNet and
//! MiniVGGNet, ready to hand to whichever framework builds and trains them.

pub mod architectures;
pub mod config;
pub mod error;
pub mod layer;
pub mod model;

pub use architectures::{minivggnet, shallownet, Architecture};
pub use config::{
    backend::{BackendConfig, EnvBackend},
    data_format::DataFormat,
    topology_config::TopologyConfig,
};
pub use error::TopologyError;
pub use model::{
    input_shape::InputShape,
    layer_desc::LayerDesc,
    layer_type::{LayerKind, LayerType, ParameterCounts},
    model::ModelDesc,
    tensor_desc::TensorDesc,
};
