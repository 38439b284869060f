//! Rendering module
//!
//! Canvas 2D backend (browser only) on top of pure shape geometry.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{BasketShape, Cubic, HeartPath, basket, heart_path};
