pub mod pdf;

pub use pdf::{write_document, ExportError};
