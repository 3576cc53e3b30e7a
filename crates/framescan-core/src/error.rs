/// Errors produced while building or transforming a [`LuminanceFrame`].
///
/// [`LuminanceFrame`]: crate::LuminanceFrame
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// The reported geometry does not fit the backing plane. This indicates
    /// a stride/dimension mismatch from the camera collaborator; it is fatal
    /// for the frame, not the session.
    #[error(
        "invalid frame geometry (width={width}, height={height}, \
         row_stride={row_stride}, pixel_stride={pixel_stride}, plane_len={plane_len})"
    )]
    Geometry {
        width: usize,
        height: usize,
        row_stride: usize,
        pixel_stride: usize,
        plane_len: usize,
    },

    /// Rotation other than 0/90/180/270 degrees.
    #[error("invalid rotation: {degrees} degrees (expected 0, 90, 180 or 270)")]
    InvalidRotation { degrees: u32 },
}

/// Errors returned by a [`Decoder`] implementation.
///
/// A failed match is *not* an error; decoders report it as
/// [`DecodeOutcome::NoMatch`]. This type covers genuine failures of the
/// decode step itself, which fault the session.
///
/// [`Decoder`]: crate::Decoder
/// [`DecodeOutcome::NoMatch`]: crate::DecodeOutcome::NoMatch
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("decoder failure: {0}")]
    Other(String),
}
