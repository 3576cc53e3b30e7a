use framescan_core::{DecodeError, FrameError};

use crate::camera::CameraError;

/// Fatal session failures delivered on the event channel.
///
/// Exactly one error is delivered per session; afterwards the session is
/// `Faulted` and the camera binding has been released. `NoMatch` outcomes
/// and point-only frames are not errors and never appear here.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Frame geometry or rotation problem. Bad geometry is tolerated once
    /// (the frame is skipped); see the session docs for the recurrence rule.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The decode step itself failed.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Camera acquisition or binding failed before any frame was processed.
    #[error(transparent)]
    DeviceBinding(#[from] CameraError),
}
