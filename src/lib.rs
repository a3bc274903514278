pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod model;
pub mod operations;

pub use config::Config;
pub use error::{PierceError, Result};
pub use operations::pass::{HolePass, PassReport};
