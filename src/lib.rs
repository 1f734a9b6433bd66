pub mod error;
pub mod feed;
pub mod geometry_utils;
pub mod render;
pub mod systems;
pub mod tracker_config;
pub mod tracking;

pub use error::{Result, TrackerError};
