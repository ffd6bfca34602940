pub mod archive;
pub mod config;
pub mod executor;
pub mod template;

pub use archive::*;
pub use config::*;
pub use executor::*;
