use thiserror::Error;

/// Errors originating from the export module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// Annotated text that does not follow the span layout we emit.
    #[error("Balisage invalide à l'octet {offset}")]
    MalformedMarkup {
        /// Byte offset into the line.
        offset: usize,
    },
}
