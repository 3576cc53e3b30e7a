//! Decode hints: named, typed configuration for the decoder capability.
//!
//! Each hint kind declares a value contract. [`HintMap::set`] silently drops
//! values that do not match the contract, so a misconfigured caller degrades
//! to default decoding instead of failing. One kind is reserved for the
//! internal point-callback wiring and can never be stored by users.

use std::collections::BTreeMap;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::symbology::Symbology;

/// Named decode hints, matching the conventional SCREAMING_SNAKE wire names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HintKind {
    /// Opaque application-defined hint (string payload).
    Other,
    /// Image is a pure monochrome barcode, no surrounding scene.
    PureBarcode,
    /// Restrict decoding to the listed symbologies.
    PossibleFormats,
    /// Spend more time trying to find a barcode.
    TryHarder,
    /// Character encoding to use when decoding text.
    CharacterSet,
    /// Allowed payload lengths for variable-length symbologies.
    AllowedLengths,
    /// Allowed EAN/UPC extension lengths (2 and/or 5 digits).
    AllowedEanExtensions,
    /// Assume Code 39 payloads carry a check digit.
    AssumeCode39CheckDigit,
    /// Assume GS1 formatting.
    AssumeGs1,
    /// Include the Codabar start/end guard characters in the result.
    ReturnCodabarStartEnd,
    /// Also try the inverted (white-on-black) image.
    AlsoInverted,
    /// Reserved: the point-found callback is wired internally by the
    /// session and must never be user-settable.
    PointCallback,
}

impl HintKind {
    /// Every hint kind, including the reserved one.
    pub const ALL: [HintKind; 12] = [
        HintKind::Other,
        HintKind::PureBarcode,
        HintKind::PossibleFormats,
        HintKind::TryHarder,
        HintKind::CharacterSet,
        HintKind::AllowedLengths,
        HintKind::AllowedEanExtensions,
        HintKind::AssumeCode39CheckDigit,
        HintKind::AssumeGs1,
        HintKind::ReturnCodabarStartEnd,
        HintKind::AlsoInverted,
        HintKind::PointCallback,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Other => "OTHER",
            Self::PureBarcode => "PURE_BARCODE",
            Self::PossibleFormats => "POSSIBLE_FORMATS",
            Self::TryHarder => "TRY_HARDER",
            Self::CharacterSet => "CHARACTER_SET",
            Self::AllowedLengths => "ALLOWED_LENGTHS",
            Self::AllowedEanExtensions => "ALLOWED_EAN_EXTENSIONS",
            Self::AssumeCode39CheckDigit => "ASSUME_CODE_39_CHECK_DIGIT",
            Self::AssumeGs1 => "ASSUME_GS1",
            Self::ReturnCodabarStartEnd => "RETURN_CODABAR_START_END",
            Self::AlsoInverted => "ALSO_INVERTED",
            Self::PointCallback => "NEED_RESULT_POINT_CALLBACK",
        }
    }

    /// Presence-only switch: stored as a canonical "on" marker or absent.
    pub fn is_switch(self) -> bool {
        matches!(
            self,
            Self::PureBarcode
                | Self::TryHarder
                | Self::AssumeCode39CheckDigit
                | Self::AssumeGs1
                | Self::ReturnCodabarStartEnd
                | Self::AlsoInverted
        )
    }

    /// Managed internally; user stores are dropped.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::PointCallback)
    }
}

/// A typed hint value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintValue {
    Flag(bool),
    Text(String),
    Lengths(Vec<u32>),
    Symbologies(Vec<Symbology>),
}

/// External (untyped) representation of a hint value, as it arrives from a
/// configuration transport such as JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalHintValue {
    Bool(bool),
    Lengths(Vec<u32>),
    Text(String),
    Texts(Vec<String>),
}

/// External hint map keyed by wire name. Unknown keys are ignored on merge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalHints(pub BTreeMap<String, ExternalHintValue>);

/// Typed hint storage handed to the [`DecoderFactory`] at session start.
///
/// [`DecoderFactory`]: crate::DecoderFactory
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HintMap {
    entries: BTreeMap<HintKind, HintValue>,
}

impl HintMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` if it matches the kind's declared contract; drop it
    /// silently otherwise.
    ///
    /// Switch kinds store a canonical "on" marker for any truthy value and
    /// remove the entry for a falsy one; an "off" marker is never stored.
    pub fn set(&mut self, kind: HintKind, value: HintValue) {
        if kind.is_reserved() {
            debug!("hint {} is reserved, dropping", kind.name());
            return;
        }
        if kind.is_switch() {
            match value {
                HintValue::Flag(true) => {
                    self.entries.insert(kind, HintValue::Flag(true));
                }
                HintValue::Flag(false) => {
                    self.entries.remove(&kind);
                }
                _ => debug!("hint {} expects a flag, dropping", kind.name()),
            }
            return;
        }
        let matches = matches!(
            (kind, &value),
            (HintKind::PossibleFormats, HintValue::Symbologies(_))
                | (HintKind::CharacterSet, HintValue::Text(_))
                | (HintKind::Other, HintValue::Text(_))
                | (HintKind::AllowedLengths, HintValue::Lengths(_))
                | (HintKind::AllowedEanExtensions, HintValue::Lengths(_))
        );
        if matches {
            self.entries.insert(kind, value);
        } else {
            debug!("hint {} value has the wrong type, dropping", kind.name());
        }
    }

    /// Convenience for switch kinds.
    pub fn set_flag(&mut self, kind: HintKind, on: bool) {
        self.set(kind, HintValue::Flag(on));
    }

    /// Merge hints from an external, untyped source.
    ///
    /// Iterates every known kind except the reserved one and applies the
    /// same type-checked rules as [`set`](Self::set). The
    /// `POSSIBLE_FORMATS` value is a list of symbology names; unparseable
    /// entries are dropped one by one, keeping the rest.
    pub fn merge_external(&mut self, external: &ExternalHints) {
        for kind in HintKind::ALL {
            if kind.is_reserved() {
                continue;
            }
            let Some(value) = external.0.get(kind.name()) else {
                continue;
            };
            match (kind, value) {
                (k, ExternalHintValue::Bool(on)) if k.is_switch() => self.set_flag(k, *on),
                (HintKind::PossibleFormats, ExternalHintValue::Texts(names)) => {
                    let formats: Vec<Symbology> = names
                        .iter()
                        .filter_map(|name| match Symbology::from_str(name) {
                            Ok(sym) => Some(sym),
                            Err(_) => {
                                debug!("dropping unknown symbology name {name:?}");
                                None
                            }
                        })
                        .collect();
                    self.set(kind, HintValue::Symbologies(formats));
                }
                (HintKind::CharacterSet | HintKind::Other, ExternalHintValue::Text(s)) => {
                    self.set(kind, HintValue::Text(s.clone()));
                }
                (
                    HintKind::AllowedLengths | HintKind::AllowedEanExtensions,
                    ExternalHintValue::Lengths(lengths),
                ) => {
                    self.set(kind, HintValue::Lengths(lengths.clone()));
                }
                _ => debug!("hint {} external value has the wrong type, dropping", kind.name()),
            }
        }
    }

    pub fn get(&self, kind: HintKind) -> Option<&HintValue> {
        self.entries.get(&kind)
    }

    /// Whether a switch hint is on.
    pub fn flag(&self, kind: HintKind) -> bool {
        matches!(self.entries.get(&kind), Some(HintValue::Flag(true)))
    }

    /// The configured symbology restriction, if any.
    pub fn formats(&self) -> Option<&[Symbology]> {
        match self.entries.get(&HintKind::PossibleFormats) {
            Some(HintValue::Symbologies(v)) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HintKind, &HintValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_stores_canonical_marker_and_falsy_removes() {
        let mut hints = HintMap::new();
        hints.set_flag(HintKind::TryHarder, true);
        assert_eq!(hints.get(HintKind::TryHarder), Some(&HintValue::Flag(true)));

        hints.set_flag(HintKind::TryHarder, false);
        assert_eq!(hints.get(HintKind::TryHarder), None);
        assert!(hints.is_empty());
    }

    #[test]
    fn mismatched_value_is_dropped_not_an_error() {
        let mut hints = HintMap::new();
        hints.set(HintKind::CharacterSet, HintValue::Lengths(vec![8]));
        hints.set(HintKind::TryHarder, HintValue::Text("yes".into()));
        hints.set(
            HintKind::AllowedLengths,
            HintValue::Symbologies(vec![Symbology::QrCode]),
        );
        assert!(hints.is_empty());
    }

    #[test]
    fn reserved_kind_is_never_stored() {
        let mut hints = HintMap::new();
        hints.set(HintKind::PointCallback, HintValue::Flag(true));
        assert_eq!(hints.get(HintKind::PointCallback), None);

        let mut ext = ExternalHints::default();
        ext.0.insert(
            "NEED_RESULT_POINT_CALLBACK".into(),
            ExternalHintValue::Bool(true),
        );
        hints.merge_external(&ext);
        assert!(hints.is_empty());
    }

    #[test]
    fn merge_parses_formats_dropping_only_bad_entries() {
        let mut ext = ExternalHints::default();
        ext.0.insert(
            "POSSIBLE_FORMATS".into(),
            ExternalHintValue::Texts(vec![
                "QR_CODE".into(),
                "NOT_A_FORMAT".into(),
                "EAN_13".into(),
            ]),
        );
        let mut hints = HintMap::new();
        hints.merge_external(&ext);
        assert_eq!(
            hints.formats(),
            Some(&[Symbology::QrCode, Symbology::Ean13][..])
        );
    }

    #[test]
    fn merge_applies_type_checked_rules() {
        let mut ext = ExternalHints::default();
        ext.0
            .insert("TRY_HARDER".into(), ExternalHintValue::Bool(true));
        ext.0
            .insert("ALSO_INVERTED".into(), ExternalHintValue::Bool(false));
        ext.0
            .insert("CHARACTER_SET".into(), ExternalHintValue::Text("UTF-8".into()));
        ext.0
            .insert("ALLOWED_LENGTHS".into(), ExternalHintValue::Lengths(vec![8, 13]));
        ext.0.insert(
            "ALLOWED_EAN_EXTENSIONS".into(),
            ExternalHintValue::Lengths(vec![2, 5]),
        );
        // Wrong type for a switch: dropped.
        ext.0
            .insert("PURE_BARCODE".into(), ExternalHintValue::Text("on".into()));
        // Unknown keys are ignored.
        ext.0
            .insert("PROMPT_MESSAGE".into(), ExternalHintValue::Text("scan".into()));

        let mut hints = HintMap::new();
        hints.merge_external(&ext);

        assert!(hints.flag(HintKind::TryHarder));
        assert!(!hints.flag(HintKind::AlsoInverted));
        assert!(!hints.flag(HintKind::PureBarcode));
        assert_eq!(
            hints.get(HintKind::CharacterSet),
            Some(&HintValue::Text("UTF-8".into()))
        );
        assert_eq!(
            hints.get(HintKind::AllowedLengths),
            Some(&HintValue::Lengths(vec![8, 13]))
        );
        assert_eq!(
            hints.get(HintKind::AllowedEanExtensions),
            Some(&HintValue::Lengths(vec![2, 5]))
        );
        assert_eq!(hints.len(), 4);
    }

    #[test]
    fn external_hints_deserialize_from_json() {
        let json = r#"{
            "TRY_HARDER": true,
            "POSSIBLE_FORMATS": ["QR_CODE", "DATA_MATRIX"],
            "ALLOWED_LENGTHS": [8, 13],
            "CHARACTER_SET": "ISO-8859-1"
        }"#;
        let ext: ExternalHints = serde_json::from_str(json).expect("deserialize");
        let mut hints = HintMap::new();
        hints.merge_external(&ext);
        assert!(hints.flag(HintKind::TryHarder));
        assert_eq!(
            hints.formats(),
            Some(&[Symbology::QrCode, Symbology::DataMatrix][..])
        );
        assert_eq!(hints.len(), 4);
    }
}
