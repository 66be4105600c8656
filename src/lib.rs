pub mod assemble;
pub mod components;
pub mod config;
pub mod report;

pub use assemble::{Assembly, assemble};
pub use config::Config;
