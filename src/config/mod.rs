pub mod backend;
pub mod data_format;
pub mod topology_config;
