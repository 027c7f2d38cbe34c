/// Serialization and export of rendered art for glyphgrid.
///
/// Formatters turn a glyph grid into plain, HTML or ANSI text; `markup`
/// undoes the annotation; `file` writes exports to disk.

pub mod error;
pub mod file;
pub mod format;
pub mod markup;
pub mod page;

pub use error::ExportError;
pub use format::{AnsiFormatter, HtmlFormatter, PlainFormatter, formatter_for, serialize, to_text};
