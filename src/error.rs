use thiserror::Error;

/// Top-level error type for floor-plan rendering and export.
///
/// None of these are fatal: every failure leaves the previously composed
/// scene and the plan snapshot untouched.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Errors reading a plan or validating caller-supplied parameters.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed floor plan JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A resource the caller asked for is not available yet.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no scene has been composed yet")]
    Unavailable,

    #[error("no rendered overlay is available")]
    OverlayUnavailable,
}

/// Errors turning a vector scene into pixels, or handling pixels we were given.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("scene markup could not be parsed: {0}")]
    Parse(String),

    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },

    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("png decoding failed: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported png layout: {0}")]
    UnsupportedPng(String),

    #[error("overlay is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("stylizer failed: {0}")]
    Stylizer(String),
}

/// Errors composing a paginated document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("degenerate page layout: {0}")]
    Layout(String),

    #[error("image has no pixels")]
    EmptyImage,
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
