pub mod config_service;
pub mod flattener;
pub mod plugin_resolver;

pub use config_service::ConfigService;
pub use flattener::{flatten, Flattener, DEFAULT_SEPARATOR};
pub use plugin_resolver::{PluginResolver, DEFAULT_PLUGIN_PATH};
