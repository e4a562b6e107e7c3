pub mod annotation_layer;
pub mod background_layer;
pub mod engine;
pub mod hit_detection;
pub mod renderer;
pub mod station_layer;

pub use engine::{MapEngine, PendingFetch};
