//! Configuration system for Fovea.
//! TOML-based, 4-layer resolution: overrides > env > project > user > defaults.

pub mod annotator_config;
pub mod fovea_config;
pub mod storage_config;

pub use annotator_config::AnnotatorConfig;
pub use fovea_config::{CliOverrides, FoveaConfig};
pub use storage_config::StorageConfig;
