//! Canvas-2D rendering
//!
//! `shapes` holds pure path geometry; `canvas` drives the browser's
//! `CanvasRenderingContext2d` and only exists on wasm32.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
