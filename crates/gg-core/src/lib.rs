/// Configuration, types, and shared structures for glyphgrid.
///
/// This crate contains the alphabet registry, the grid and raster types,
/// configuration and the error taxonomy shared across the workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::{DensityLut, GlyphAlphabet};
pub use color::Rgb;
pub use config::{AppConfig, RenderOptions};
pub use error::CoreError;
pub use frame::{Dimensions, FrameBuffer, GlyphCell, Grid, RenderedArt};
pub use traits::{GlyphFormatter, RasterImage};
