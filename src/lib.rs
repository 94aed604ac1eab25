pub mod actor;
pub mod common;
pub mod geometry;
pub mod layout_engine;
pub mod model;
