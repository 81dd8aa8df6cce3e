use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use thiserror::Error;

/// Failures before the render loop starts. All of them are fatal.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Vulkan library unavailable: {0}")]
    Library(#[from] vulkano::LoadingError),

    #[error("cannot read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config {path:?}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("{stage} failed: {message}")]
    Context { stage: &'static str, message: String },

    #[error("no primary window was created")]
    NoWindow,

    #[error("shader has no `{0}` entry point")]
    MissingEntryPoint(&'static str),

    #[error("{stage} failed: {message}")]
    Gpu { stage: &'static str, message: String },
}

impl SetupError {
    pub fn gpu<E: Display>(stage: &'static str) -> impl FnOnce(E) -> SetupError {
        move |err| SetupError::Gpu {
            stage,
            message: err.to_string(),
        }
    }
}

/// Runs a setup step from a library that reports failure by panicking
/// (winit backend selection, vulkano-util instance, device and surface creation).
pub fn catch_setup<T>(stage: &'static str, step: impl FnOnce() -> T) -> Result<T, SetupError> {
    panic::catch_unwind(AssertUnwindSafe(step)).map_err(|payload| SetupError::Context {
        stage,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Failures while drawing a single frame. The frame is dropped and the loop goes on.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("no primary window to draw into")]
    NoWindow,

    #[error("{stage} failed: {message}")]
    Gpu { stage: &'static str, message: String },
}

impl FrameError {
    pub fn gpu<E: Display>(stage: &'static str) -> impl FnOnce(E) -> FrameError {
        move |err| FrameError::Gpu {
            stage,
            message: err.to_string(),
        }
    }
}
