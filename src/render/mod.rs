pub mod canvas;
pub mod renderer;

pub use canvas::{Canvas, GridCanvas, Paint, SceneView, draw_scene};
pub use renderer::Renderer;
