use thiserror::Error;

/// Errors originating from the core module.
///
/// All of them are local validation failures: the caller fixes its input and
/// renders again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Source image with zero width or height.
    #[error("Image invalide : {width}×{height}")]
    InvalidImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// Non-positive column count.
    #[error("Nombre de colonnes invalide : {columns}")]
    InvalidDimension {
        /// Requested column count.
        columns: u32,
    },

    /// Alphabet name missing from the registry.
    #[error("Alphabet inconnu : {name}")]
    UnknownAlphabet {
        /// The name that was looked up.
        name: String,
    },

    /// Color string that is not `#rrggbb` / `#rgb`.
    #[error("Couleur invalide : {value}")]
    InvalidColor {
        /// The rejected input.
        value: String,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
