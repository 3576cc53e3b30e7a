//! The pluggable decoder capability.
//!
//! Concrete decoding algorithms sit behind [`Decoder`]; the session only
//! sees the outcome of each attempt plus the side channel of candidate
//! points gathered along the way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::frame::LuminanceFrame;
use crate::hints::HintMap;
use crate::symbology::Symbology;

/// A candidate feature location (e.g. a finder-pattern corner), in the
/// coordinate space of the frame handed to [`Decoder::decode`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A successfully decoded payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanMatch {
    pub symbology: Symbology,
    pub text: String,
    /// Raw payload bytes, when the symbology distinguishes them from text.
    pub raw_bytes: Option<Vec<u8>>,
    /// Decoder-specific metadata (error-correction level, orientation, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl ScanMatch {
    pub fn new(symbology: Symbology, text: impl Into<String>) -> Self {
        Self {
            symbology,
            text: text.into(),
            raw_bytes: None,
            metadata: BTreeMap::new(),
        }
    }
}

/// Result of one decode attempt. `NoMatch` is a valid outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeOutcome {
    Matched(ScanMatch),
    NoMatch,
}

/// Capability interface for a barcode decoding algorithm.
///
/// Implementations are configured once (through the [`HintMap`] given to
/// their [`DecoderFactory`]) and are otherwise stateless across calls,
/// except for internal retry heuristics.
pub trait Decoder: Send {
    /// Attempt to decode one frame.
    fn decode(&mut self, frame: &LuminanceFrame) -> Result<DecodeOutcome, DecodeError>;

    /// Candidate points gathered during the most recent [`decode`] call,
    /// whether or not it matched. Valid until the next call.
    ///
    /// [`decode`]: Decoder::decode
    fn possible_points(&self) -> &[Point];
}

/// Creates a configured [`Decoder`] for a scan session.
///
/// The session calls this exactly once at start; the hint map is immutable
/// for that session afterwards.
pub trait DecoderFactory: Send + Sync {
    fn create(&self, hints: &HintMap) -> Box<dyn Decoder + Send>;
}

impl<F> DecoderFactory for F
where
    F: Fn(&HintMap) -> Box<dyn Decoder + Send> + Send + Sync,
{
    fn create(&self, hints: &HintMap) -> Box<dyn Decoder + Send> {
        self(hints)
    }
}
