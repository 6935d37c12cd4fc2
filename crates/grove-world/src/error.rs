//! World output error types.

/// Errors that can occur while rendering or writing a world document.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The XML writer rejected an event.
    #[error("failed to encode world document: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Failed to write the world file to disk.
    #[error("failed to write world file: {0}")]
    Io(#[from] std::io::Error),
}
