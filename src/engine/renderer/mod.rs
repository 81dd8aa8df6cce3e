pub mod helper;
pub mod render;
pub mod uniforms;
