use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationType {
    #[serde(rename = "relu")]
    ReLU,
    // Normalizes over the last axis into a class-probability distribution
    Softmax,
}

impl ActivationType {
    // Identifier the consuming framework knows the function by
    pub fn name(&self) -> &'static str {
        match self {
            ActivationType::ReLU => "relu",
            ActivationType::Softmax => "softmax",
        }
    }
}

impl fmt::Display for ActivationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivationType::ReLU => f.write_str("ReLU"),
            ActivationType::Softmax => f.write_str("Softmax"),
        }
    }
}
