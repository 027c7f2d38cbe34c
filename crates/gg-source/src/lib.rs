/// Image acquisition for glyphgrid: decoding and pre-scaling.

pub mod image;
pub mod resize;
