//! Barcode symbology identifiers.
//!
//! Names follow the conventional SCREAMING_SNAKE wire spelling used by
//! decode-hint transports, so external configuration round-trips without a
//! translation table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A barcode format/standard the decoder can be asked to look for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbology {
    #[serde(rename = "AZTEC")]
    Aztec,
    #[serde(rename = "CODABAR")]
    Codabar,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "CODE_93")]
    Code93,
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "DATA_MATRIX")]
    DataMatrix,
    #[serde(rename = "EAN_8")]
    Ean8,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "ITF")]
    Itf,
    #[serde(rename = "MAXICODE")]
    MaxiCode,
    #[serde(rename = "PDF_417")]
    Pdf417,
    #[serde(rename = "QR_CODE")]
    QrCode,
    #[serde(rename = "RSS_14")]
    Rss14,
    #[serde(rename = "RSS_EXPANDED")]
    RssExpanded,
    #[serde(rename = "UPC_A")]
    UpcA,
    #[serde(rename = "UPC_E")]
    UpcE,
    #[serde(rename = "UPC_EAN_EXTENSION")]
    UpcEanExtension,
}

/// Failure to parse a symbology name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown symbology name: {0}")]
pub struct ParseSymbologyError(pub String);

impl Symbology {
    /// Retail product codes.
    pub const PRODUCT: &'static [Symbology] = &[
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Rss14,
        Symbology::RssExpanded,
    ];

    /// Industrial one-dimensional codes.
    pub const INDUSTRIAL: &'static [Symbology] = &[
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Code128,
        Symbology::Itf,
        Symbology::Codabar,
    ];

    /// All one-dimensional codes (product + industrial).
    pub const ONE_D: &'static [Symbology] = &[
        Symbology::Ean8,
        Symbology::Ean13,
        Symbology::UpcA,
        Symbology::UpcE,
        Symbology::Rss14,
        Symbology::RssExpanded,
        Symbology::Code39,
        Symbology::Code93,
        Symbology::Code128,
        Symbology::Itf,
        Symbology::Codabar,
    ];

    /// Matrix/stacked two-dimensional codes.
    pub const TWO_D: &'static [Symbology] = &[
        Symbology::QrCode,
        Symbology::DataMatrix,
        Symbology::Aztec,
        Symbology::Pdf417,
        Symbology::MaxiCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Aztec => "AZTEC",
            Self::Codabar => "CODABAR",
            Self::Code39 => "CODE_39",
            Self::Code93 => "CODE_93",
            Self::Code128 => "CODE_128",
            Self::DataMatrix => "DATA_MATRIX",
            Self::Ean8 => "EAN_8",
            Self::Ean13 => "EAN_13",
            Self::Itf => "ITF",
            Self::MaxiCode => "MAXICODE",
            Self::Pdf417 => "PDF_417",
            Self::QrCode => "QR_CODE",
            Self::Rss14 => "RSS_14",
            Self::RssExpanded => "RSS_EXPANDED",
            Self::UpcA => "UPC_A",
            Self::UpcE => "UPC_E",
            Self::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbology {
    type Err = ParseSymbologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AZTEC" => Ok(Self::Aztec),
            "CODABAR" => Ok(Self::Codabar),
            "CODE_39" => Ok(Self::Code39),
            "CODE_93" => Ok(Self::Code93),
            "CODE_128" => Ok(Self::Code128),
            "DATA_MATRIX" => Ok(Self::DataMatrix),
            "EAN_8" => Ok(Self::Ean8),
            "EAN_13" => Ok(Self::Ean13),
            "ITF" => Ok(Self::Itf),
            "MAXICODE" => Ok(Self::MaxiCode),
            "PDF_417" => Ok(Self::Pdf417),
            "QR_CODE" => Ok(Self::QrCode),
            "RSS_14" => Ok(Self::Rss14),
            "RSS_EXPANDED" => Ok(Self::RssExpanded),
            "UPC_A" => Ok(Self::UpcA),
            "UPC_E" => Ok(Self::UpcE),
            "UPC_EAN_EXTENSION" => Ok(Self::UpcEanExtension),
            other => Err(ParseSymbologyError(other.to_owned())),
        }
    }
}
