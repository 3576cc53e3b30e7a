//! Event handoff between the decode worker and the coordinating context.
//!
//! The decode worker never calls listener code directly: it enqueues
//! [`SessionEvent`]s on a channel and the coordinating context (typically
//! the UI/event loop) drains them. That preserves the guarantee that
//! listener code can touch shared UI state without its own locking.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use framescan_core::{Point, ScanMatch};

use crate::error::ScanError;

/// A notification from the session, in delivery order.
#[derive(Debug)]
pub enum SessionEvent {
    /// A decoded payload passed the scan-mode policy.
    Result(ScanMatch),
    /// The session faulted; this is the only error the session will send.
    Error(ScanError),
    /// Dimensions of the frame the following points refer to. Sent once
    /// before each batch of points.
    ImageSize { width: usize, height: usize },
    /// A possible result point, already mirrored for front cameras.
    Point(Point),
}

/// Receives decoded payloads and fatal errors.
pub trait ResultListener {
    fn on_result(&mut self, result: &ScanMatch);
    fn on_error(&mut self, error: &ScanError);
}

/// Optionally receives candidate points for viewfinder feedback.
pub trait PointListener {
    fn set_image_size(&mut self, width: usize, height: usize);
    fn found_point(&mut self, point: Point);
}

/// Consuming side of the session's event channel.
///
/// Owned by the coordinating context. Either take [`SessionEvent`]s directly
/// or replay them into listener callbacks with
/// [`dispatch_pending`](Self::dispatch_pending).
pub struct SessionEvents {
    rx: Receiver<SessionEvent>,
}

impl SessionEvents {
    pub(crate) fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }

    /// Next pending event, without blocking.
    pub fn try_next(&self) -> Option<SessionEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<SessionEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Drain every pending event.
    pub fn drain_pending(&self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_next() {
            events.push(event);
        }
        events
    }

    /// Drain pending events into listener callbacks.
    ///
    /// Point events are dropped when no point listener is given.
    pub fn dispatch_pending(
        &self,
        results: &mut dyn ResultListener,
        mut points: Option<&mut dyn PointListener>,
    ) {
        while let Some(event) = self.try_next() {
            match event {
                SessionEvent::Result(m) => results.on_result(&m),
                SessionEvent::Error(e) => results.on_error(&e),
                SessionEvent::ImageSize { width, height } => {
                    if let Some(listener) = points.as_deref_mut() {
                        listener.set_image_size(width, height);
                    }
                }
                SessionEvent::Point(p) => {
                    if let Some(listener) = points.as_deref_mut() {
                        listener.found_point(p);
                    }
                }
            }
        }
    }
}
