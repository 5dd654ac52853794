//! Commands the host application adds to the console

pub mod fs;

pub use fs::WorkingDir;
