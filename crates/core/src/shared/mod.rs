pub mod cascade_config;
pub mod cascade_resolver;
pub mod constants;
pub mod error;
pub mod frame;
pub mod region;
pub mod settings;
