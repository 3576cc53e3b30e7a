//! The scan-session state machine.
//!
//! A session owns the per-scan policy: the scan mode, the duplicate filter
//! for continuous scanning, and the sequencing of each delivered frame
//! through build → decode → classify → notify. The camera collaborator
//! pushes frames serialized on a single decode worker; listener
//! notifications leave through the event channel and are dispatched on the
//! coordinating context.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use framescan_core::{
    DecodeOutcome, Decoder, DecoderFactory, ExternalHints, FrameError, HintKind, HintMap,
    HintValue, LuminanceFrame, Symbology,
};

use crate::camera::{CameraBinding, CameraControl, CameraDevice, Facing, RawFrame};
use crate::error::ScanError;
use crate::events::{SessionEvent, SessionEvents};
use crate::points::mirror_horizontal;

/// Whether the session stops after the first match or keeps scanning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    /// Report the first match, then stop and release the camera.
    #[default]
    Single,
    /// Keep running; suppress a match whose text equals the previously
    /// reported one. Only the most recent text is compared, so the pattern
    /// `A, B, A` reports all three.
    Continuous,
}

/// Session lifecycle. `Running` is the only frame-accepting state; the
/// `Stopped` and `Faulted` transitions are one-way latches for the decode
/// worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Stopped,
    Faulted,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoning panic happened on another thread; the guarded handles are
    // still sound to release, so keep going.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Camera handles shared between the coordinating context and `start`.
///
/// Guarded by one mutex covering binding creation, `stop` and torch
/// toggling. The mutex is never held across a decode.
#[derive(Default)]
struct CameraShared {
    binding: Option<Box<dyn CameraBinding>>,
    control: Option<Box<dyn CameraControl>>,
    torch: bool,
}

/// Fields touched only from the decode worker (single-writer).
struct DecodeShared {
    decoder: Option<Box<dyn Decoder + Send>>,
    last_text: Option<String>,
    invalid_streak: u32,
}

/// Configures and creates a [`ScanSession`].
pub struct ScanSessionBuilder {
    factory: Arc<dyn DecoderFactory>,
    mode: ScanMode,
    hints: HintMap,
    facing: Option<Facing>,
    torch: bool,
    report_points: bool,
}

impl ScanSessionBuilder {
    /// Start configuring a session around a decoder factory.
    pub fn new(factory: Arc<dyn DecoderFactory>) -> Self {
        Self {
            factory,
            mode: ScanMode::default(),
            hints: HintMap::new(),
            facing: None,
            torch: false,
            report_points: false,
        }
    }

    pub fn scan_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the hint map wholesale.
    pub fn hints(mut self, hints: HintMap) -> Self {
        self.hints = hints;
        self
    }

    /// Merge hints from an external, untyped source (type-checked; bad
    /// entries are dropped silently).
    pub fn external_hints(mut self, external: &ExternalHints) -> Self {
        self.hints.merge_external(external);
        self
    }

    /// Restrict decoding to the given symbologies.
    pub fn formats(mut self, formats: &[Symbology]) -> Self {
        self.hints
            .set(HintKind::PossibleFormats, HintValue::Symbologies(formats.to_vec()));
        self
    }

    /// Ask the decoder to spend more effort per frame.
    pub fn try_harder(mut self, on: bool) -> Self {
        self.hints.set_flag(HintKind::TryHarder, on);
        self
    }

    /// Also try white-on-black decoding.
    pub fn also_inverted(mut self, on: bool) -> Self {
        self.hints.set_flag(HintKind::AlsoInverted, on);
        self
    }

    /// Preferred lens facing; `None` (the default) lets the device decide.
    /// A front-facing camera enables the horizontal mirror on every frame.
    pub fn facing(mut self, facing: Option<Facing>) -> Self {
        self.facing = facing;
        self
    }

    /// Torch state to apply as soon as the camera is bound.
    pub fn torch(mut self, on: bool) -> Self {
        self.torch = on;
        self
    }

    /// Forward possible result points on the event channel.
    pub fn report_points(mut self, on: bool) -> Self {
        self.report_points = on;
        self
    }

    /// Create the session and the receiving end of its event channel.
    pub fn build(self, camera: Arc<dyn CameraDevice>) -> (ScanSession, SessionEvents) {
        let (tx, rx) = mpsc::channel();
        let session = ScanSession {
            factory: self.factory,
            mode: self.mode,
            hints: self.hints,
            facing: self.facing,
            report_points: self.report_points,
            camera,
            events: tx,
            state: Mutex::new(SessionState::Idle),
            shared: Mutex::new(CameraShared {
                torch: self.torch,
                ..CameraShared::default()
            }),
            decode: Mutex::new(DecodeShared {
                decoder: None,
                last_text: None,
                invalid_streak: 0,
            }),
        };
        (session, SessionEvents::new(rx))
    }
}

/// A live scan session.
///
/// Created via [`ScanSessionBuilder`]. `start`, `stop` and `set_torch` are
/// expected from the coordinating context; [`process_frame`] is called by
/// the camera collaborator on the single decode worker. All methods take
/// `&self`, so the session can be shared across both contexts in an `Arc`.
///
/// [`process_frame`]: ScanSession::process_frame
pub struct ScanSession {
    factory: Arc<dyn DecoderFactory>,
    mode: ScanMode,
    hints: HintMap,
    facing: Option<Facing>,
    report_points: bool,
    camera: Arc<dyn CameraDevice>,
    events: mpsc::Sender<SessionEvent>,
    state: Mutex<SessionState>,
    shared: Mutex<CameraShared>,
    decode: Mutex<DecodeShared>,
}

impl ScanSession {
    /// Bind the camera and start accepting frames.
    ///
    /// Binding may be slow; failures are not returned here but surface as
    /// exactly one [`SessionEvent::Error`] and fault the session.
    pub fn start(&self) {
        {
            let state = lock(&self.state);
            if *state != SessionState::Idle {
                warn!("start ignored in state {:?}", *state);
                return;
            }
        }
        match self.camera.bind(self.facing) {
            Ok((binding, mut control)) => {
                {
                    let mut shared = lock(&self.shared);
                    control.set_torch(shared.torch);
                    shared.control = Some(control);
                    shared.binding = Some(binding);
                }
                lock(&self.decode).decoder = Some(self.factory.create(&self.hints));
                *lock(&self.state) = SessionState::Running;
                debug!("session running (mode {:?}, facing {:?})", self.mode, self.facing);
            }
            Err(e) => self.fault(ScanError::DeviceBinding(e)),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        *lock(&self.state)
    }

    /// Handle one camera frame. Called by the camera collaborator on the
    /// decode worker; deliveries must be serialized.
    ///
    /// Ignored unless the session is `Running`.
    pub fn process_frame(&self, frame: RawFrame) {
        if self.state() != SessionState::Running {
            return;
        }
        let mut decode = lock(&self.decode);
        if let Err(err) = self.handle_frame(&mut decode, frame) {
            match &err {
                // Bad geometry only condemns the frame; a recurrence on the
                // next delivered frame faults the session.
                ScanError::Frame(FrameError::Geometry { .. }) => {
                    decode.invalid_streak += 1;
                    if decode.invalid_streak > 1 {
                        self.fault(err);
                    } else {
                        warn!("skipping frame: {err}");
                    }
                }
                _ => self.fault(err),
            }
        }
    }

    fn handle_frame(&self, decode: &mut DecodeShared, frame: RawFrame) -> Result<(), ScanError> {
        let flipped = self.facing == Some(Facing::Front);
        let luma = LuminanceFrame::new(
            frame.plane,
            frame.width,
            frame.height,
            frame.row_stride,
            frame.pixel_stride,
        )?
        .flip_horizontal(flipped)
        .rotate(frame.rotation_degrees)?;
        decode.invalid_streak = 0;

        let DecodeShared {
            decoder, last_text, ..
        } = decode;
        let Some(decoder) = decoder.as_mut() else {
            return Ok(());
        };
        let outcome = decoder.decode(&luma)?;

        if let DecodeOutcome::Matched(result) = outcome {
            match self.mode {
                ScanMode::Single => {
                    let _ = self.events.send(SessionEvent::Result(result));
                    self.halt();
                    return Ok(());
                }
                ScanMode::Continuous => {
                    // Session-local last-value dedup; an empty previous
                    // value never suppresses a first report.
                    if last_text.as_deref() != Some(result.text.as_str()) {
                        *last_text = Some(result.text.clone());
                        let _ = self.events.send(SessionEvent::Result(result));
                    }
                }
            }
        }

        if self.report_points {
            let points = decoder.possible_points();
            if !points.is_empty() {
                let _ = self.events.send(SessionEvent::ImageSize {
                    width: luma.width(),
                    height: luma.height(),
                });
                for &point in points {
                    let point = if flipped {
                        mirror_horizontal(point, luma.width())
                    } else {
                        point
                    };
                    let _ = self.events.send(SessionEvent::Point(point));
                }
            }
        }
        Ok(())
    }

    /// Switch the torch on or off.
    ///
    /// Takes effect immediately against the live camera control when a
    /// binding is held; otherwise only the stored flag changes, to be
    /// applied on the next `start`.
    pub fn set_torch(&self, on: bool) {
        let mut shared = lock(&self.shared);
        shared.torch = on;
        if let Some(control) = shared.control.as_mut() {
            control.set_torch(on);
        }
    }

    /// Stop the session and release the camera binding.
    ///
    /// Idempotent from any state; never delivers an error. Does not
    /// interrupt a decode already in flight, but no further frame will be
    /// processed once it returns.
    pub fn stop(&self) {
        *lock(&self.state) = SessionState::Stopped;
        self.release_camera();
    }

    /// Single-mode latch: one-way transition to `Stopped` from the worker.
    fn halt(&self) {
        let mut state = lock(&self.state);
        if *state == SessionState::Running {
            *state = SessionState::Stopped;
        }
        drop(state);
        self.release_camera();
    }

    /// Fault the session, delivering at most one error per session.
    fn fault(&self, err: ScanError) {
        {
            let mut state = lock(&self.state);
            if !matches!(*state, SessionState::Idle | SessionState::Running) {
                return;
            }
            *state = SessionState::Faulted;
        }
        error!("session faulted: {err}");
        let _ = self.events.send(SessionEvent::Error(err));
        self.release_camera();
    }

    fn release_camera(&self) {
        let mut shared = lock(&self.shared);
        shared.control = None;
        if let Some(mut binding) = shared.binding.take() {
            binding.unbind();
        }
    }
}
