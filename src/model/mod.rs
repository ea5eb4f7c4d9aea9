pub mod task;
pub mod config;

pub use task::*;
pub use config::*;
