use std::fmt;
use std::str::FromStr;

use crate::{
    config::{backend::BackendConfig, topology_config::TopologyConfig},
    error::TopologyError,
    model::model::ModelDesc,
};

pub mod minivggnet;
pub mod shallownet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Architecture {
    ShallowNet,
    MiniVggNet,
}

impl Architecture {
    pub fn build<B>(&self, config: &TopologyConfig, backend: &B) -> Result<ModelDesc, TopologyError>
    where
        B: BackendConfig + ?Sized,
    {
        match self {
            Architecture::ShallowNet => shallownet::build(
                config.width,
                config.height,
                config.depth,
                config.classes,
                backend,
            ),
            Architecture::MiniVggNet => minivggnet::build(
                config.width,
                config.height,
                config.depth,
                config.classes,
                config.batch_norm,
                backend,
            ),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::ShallowNet => f.write_str("shallownet"),
            Architecture::MiniVggNet => f.write_str("minivggnet"),
        }
    }
}

impl FromStr for Architecture {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shallownet" => Ok(Architecture::ShallowNet),
            "minivggnet" => Ok(Architecture::MiniVggNet),
            _ => Err(TopologyError::UnknownArchitecture(s.to_string())),
        }
    }
}
