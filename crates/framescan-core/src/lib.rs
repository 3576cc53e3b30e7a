//! Core types for live barcode scanning.
//!
//! This crate is intentionally small and I/O free. It defines the luminance
//! frame handed to a decoder, the pluggable decoder capability, the decode
//! hint model used to configure it, and the shared error taxonomy. The
//! scan-session state machine that drives these types lives in the
//! `framescan` crate.

mod decoder;
mod error;
mod frame;
mod hints;
mod logger;
mod symbology;

pub use decoder::{DecodeOutcome, Decoder, DecoderFactory, Point, ScanMatch};
pub use error::{DecodeError, FrameError};
pub use frame::{LuminanceFrame, Rotation};
pub use hints::{ExternalHintValue, ExternalHints, HintKind, HintMap, HintValue};
pub use symbology::{ParseSymbologyError, Symbology};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
