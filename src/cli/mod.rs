mod config;
mod output;

pub use config::OrbitFile;
pub use output::{write_trajectory, Format};
