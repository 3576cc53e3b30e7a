//! Scan-session state machine for live barcode scanning.
//!
//! A camera collaborator pushes raw luma frames; the session normalizes
//! them into a [`LuminanceFrame`] (front-camera mirror, sensor rotation),
//! hands them to a pluggable [`Decoder`], applies the scan-mode policy and
//! forwards results, errors and candidate points to the coordinating
//! context over an event channel.
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::sync::Arc;
//! use framescan::{ScanMode, ScanSessionBuilder, SessionEvent, Symbology};
//! # fn decoder_factory() -> Arc<dyn framescan::DecoderFactory> { unimplemented!() }
//! # fn camera() -> Arc<dyn framescan::CameraDevice> { unimplemented!() }
//!
//! let (session, events) = ScanSessionBuilder::new(decoder_factory())
//!     .scan_mode(ScanMode::Single)
//!     .formats(Symbology::TWO_D)
//!     .try_harder(true)
//!     .build(camera());
//!
//! session.start();
//! // Coordinating context: drain events while the camera worker feeds
//! // session.process_frame(..) from its own thread.
//! while let Some(event) = events.next_timeout(std::time::Duration::from_secs(1)) {
//!     if let SessionEvent::Result(result) = event {
//!         println!("{}: {}", result.symbology, result.text);
//!         break;
//!     }
//! }
//! session.stop();
//! ```
//!
//! Decoding algorithms and platform camera APIs stay out of this crate:
//! implement [`Decoder`]/[`DecoderFactory`] over the symbol library of your
//! choice and [`CameraDevice`] over the platform camera, and inject both.

pub use framescan_core as core;

mod camera;
mod error;
mod events;
mod points;
mod session;

pub use camera::{CameraBinding, CameraControl, CameraDevice, CameraError, Facing, RawFrame};
pub use error::ScanError;
pub use events::{PointListener, ResultListener, SessionEvent, SessionEvents};
pub use points::mirror_horizontal;
pub use session::{ScanMode, ScanSession, ScanSessionBuilder, SessionState};

pub use framescan_core::{
    DecodeError, DecodeOutcome, Decoder, DecoderFactory, ExternalHintValue, ExternalHints,
    FrameError, HintKind, HintMap, HintValue, LuminanceFrame, ParseSymbologyError, Point,
    Rotation, ScanMatch, Symbology,
};
