use thiserror::Error;

/// Errors raised while validating or generating mesh geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Non-positive radius, zero tessellation count, or an otherwise unusable parameter.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A caller-provided output buffer cannot hold the generated data.
    #[error("{buffer} buffer too small: need {required} elements, got {provided}")]
    BufferTooSmall {
        buffer: &'static str,
        required: usize,
        provided: usize,
    },
}

pub type GeometryResult<T> = Result<T, GeometryError>;
