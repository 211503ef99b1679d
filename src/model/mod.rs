pub mod input_shape;
pub mod layer_desc;
pub mod layer_params;
pub mod layer_type;
pub mod model;
pub mod print_model_stats;
pub mod tensor_desc;
