pub mod ami;
pub mod authmap;
pub mod config;

pub use ami::{FailedResolution, resolve};
