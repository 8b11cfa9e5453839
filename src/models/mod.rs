pub mod camera_config;
pub mod export;
pub mod export_request;

pub use camera_config::*;
pub use export::*;
pub use export_request::*;
