//! Render error types.

use thiserror::Error;

/// Errors surfaced by the transform pipeline.
///
/// Recoverable conditions (an unknown language, a grammar that fails on one
/// block, a disk hiccup) are absorbed where they occur and degrade the
/// affected fragment; only a pipeline-fatal condition reaches this type, and
/// the coordinator converts even that into an error-notice document rather
/// than failing the request.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("syntax highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    #[error("render pipeline failed: {0}")]
    Pipeline(String),
}

impl From<syntect::parsing::ParsingError> for RenderError {
    fn from(err: syntect::parsing::ParsingError) -> Self {
        RenderError::Highlight(err.into())
    }
}
