//! Canvas 2D rendering module
//!
//! `scene` turns the game state into plain drawing data; `canvas2d` paints it
//! in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasRenderer;
pub use scene::Scene;
