mod file_config_provider;
mod http_config_provider;
mod static_config_provider;

pub use file_config_provider::FileConfigProvider;
pub use http_config_provider::HttpConfigProvider;
pub use static_config_provider::StaticConfigProvider;
