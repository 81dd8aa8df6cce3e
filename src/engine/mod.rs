pub mod engine;
pub mod error;
pub mod input;
pub mod renderer;
pub mod shaders;
pub mod telemetry;
pub mod view;
