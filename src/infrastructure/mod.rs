//! 基础设施层：配置、日志与跨域

pub mod config;
pub mod cors;
pub mod logger;

pub use config::{load_config, Config, ConfigError};
pub use logger::Logger;
