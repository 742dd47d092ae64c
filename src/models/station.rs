use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::utils::constants::{IDF_MAX_LAT, IDF_MAX_LON, IDF_MIN_LAT, IDF_MIN_LON};

/// Rail service category of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    Metro,
    #[serde(rename = "RER")]
    Rer,
    Train,
    Tram,
    #[serde(rename = "VAL")]
    Val,
    Other,
}

impl TransportMode {
    /// Parse a mode label from an explicit mode column; unknown labels map
    /// to `Other` so the parse is total
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "metro" | "métro" => Self::Metro,
            "rer" => Self::Rer,
            "train" => Self::Train,
            "tram" | "tramway" => Self::Tram,
            "val" => Self::Val,
            _ => Self::Other,
        }
    }

    /// Derive the mode from the indicator flags, first true wins in the
    /// order Metro, RER, Train, Tram, VAL
    pub fn from_flags(flags: &ModeFlags) -> Self {
        if flags.metro {
            Self::Metro
        } else if flags.rer {
            Self::Rer
        } else if flags.train {
            Self::Train
        } else if flags.tram {
            Self::Tram
        } else if flags.val {
            Self::Val
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Metro => "Metro",
            Self::Rer => "RER",
            Self::Train => "Train",
            Self::Tram => "Tram",
            Self::Val => "VAL",
            Self::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Per-mode indicator columns of the stations dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    pub metro: bool,
    pub rer: bool,
    pub train: bool,
    pub tram: bool,
    pub val: bool,
}

/// How station modes were obtained for a given load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSource {
    /// The dataset carries an explicit mode column
    Explicit,
    /// No mode column; derived from the indicator flags
    DerivedFromFlags,
}

impl fmt::Display for ModeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => write!(f, "explicit mode column"),
            Self::DerivedFromFlags => write!(f, "derived from indicator flags"),
        }
    }
}

/// A station from the geolocation dataset, keyed like the validation rows
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    #[validate(length(min = 1))]
    pub station_key: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub mode: TransportMode,

    pub operator: Option<String>,

    pub flags: ModeFlags,
}

impl StationRecord {
    pub fn new(
        station_key: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        mode: TransportMode,
        operator: Option<String>,
        flags: ModeFlags,
    ) -> Self {
        Self {
            station_key,
            latitude,
            longitude,
            mode,
            operator,
            flags,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn is_within_idf_bounds(&self) -> bool {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                lat >= IDF_MIN_LAT && lat <= IDF_MAX_LAT && lon >= IDF_MIN_LON && lon <= IDF_MAX_LON
            }
            _ => false,
        }
    }
}
