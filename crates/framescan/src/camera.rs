//! The camera collaborator seam.
//!
//! The session never talks to a platform camera API directly. A host
//! implements these three narrow traits per target platform and injects the
//! device into the session; the session only binds, unbinds and toggles the
//! torch. Frame acquisition stays on the collaborator's side: it pushes
//! [`RawFrame`]s into the session from its single decode worker, the session
//! never pulls.

use serde::{Deserialize, Serialize};

/// Preferred camera lens facing. `None` at the session level lets the
/// device decide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Front,
    Back,
}

/// One camera frame as delivered by the collaborator: a raw luma plane plus
/// the geometry and the sensor rotation needed to display it upright.
#[derive(Clone, Debug)]
pub struct RawFrame {
    pub plane: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub row_stride: usize,
    pub pixel_stride: usize,
    /// Clockwise degrees the frame must be rotated to appear upright.
    pub rotation_degrees: u32,
}

/// Errors from the camera acquisition/bind step.
#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("no camera device available (facing: {facing:?})")]
    NoDevice { facing: Option<Facing> },

    #[error("camera binding failed: {0}")]
    Bind(String),
}

/// A held camera binding. Dropping the handle without calling
/// [`unbind`](Self::unbind) leaks the device on platforms that require an
/// explicit release, so the session always unbinds explicitly.
pub trait CameraBinding: Send {
    fn unbind(&mut self);
}

/// Live camera controls, valid while the binding is held.
pub trait CameraControl: Send {
    fn set_torch(&mut self, on: bool);
}

/// A camera device that can be bound to a scan session.
pub trait CameraDevice: Send + Sync {
    /// Acquire the device and start frame delivery.
    ///
    /// May be slow (device handshakes); the session calls it from
    /// [`start`](crate::ScanSession::start) and reports failures on the
    /// event channel rather than synchronously.
    fn bind(
        &self,
        facing: Option<Facing>,
    ) -> Result<(Box<dyn CameraBinding>, Box<dyn CameraControl>), CameraError>;
}
