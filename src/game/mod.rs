pub mod types;
pub mod level;
pub mod catalog;
pub mod state;
pub mod queue;
pub mod engine;
pub mod builder;
pub mod quiz;
pub mod systems;
