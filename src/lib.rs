#![allow(clippy::implicit_hasher)]

pub mod api;
pub mod components;
pub mod constants;
pub mod geodesy;
pub mod geometry;
pub mod logging;
pub mod models;
pub mod projection;
pub mod time;

pub use components::app::App;
