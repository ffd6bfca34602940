pub mod backend;
pub mod go;

pub use backend::*;
pub use go::*;
