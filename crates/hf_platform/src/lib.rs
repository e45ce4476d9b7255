pub mod config;
pub mod window;

pub use config::{
    load_config_from_path, resolve_config, PlatformConfig, Theme, DEFAULT_CONFIG_PATH,
};
pub use window::create_window;
