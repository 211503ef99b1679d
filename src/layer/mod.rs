pub mod activations;
pub mod factory;
