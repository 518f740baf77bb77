pub mod config_loader;
pub mod log_config;
#[cfg(target_os = "linux")]
pub mod interfaces;

pub use config_loader::{CodecConfig, ConfigLoader, NetfieldConfig};
pub use log_config::{init_logging, LogConfig};
