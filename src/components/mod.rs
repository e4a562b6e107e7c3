#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod canvas_viewport;
pub mod map_canvas;
pub mod station_list;
pub mod station_map;
pub mod station_search;
