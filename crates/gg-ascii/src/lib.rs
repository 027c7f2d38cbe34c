/// ASCII conversion engine for glyphgrid.
///
/// Samples a raster image onto a character grid and maps each cell's
/// brightness to a glyph.
pub mod compositor;
pub mod density;
pub mod sampler;

pub use compositor::{render, render_at};
