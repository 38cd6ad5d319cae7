//! Raw record shapes returned by the Radio Browser API.
//!
//! These only exist between the HTTP response and the transform step.
//! Unknown upstream fields are ignored.

use serde::Deserialize;

use crate::domain::RecordShapeError;

/// A country entry from `GET /countries`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub name: String,
    pub iso_3166_1: String,
    pub stationcount: u32,
}

/// A station entry from `GET /stations/bycountrycodeexact/{code}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStation {
    pub stationuuid: String,
    pub name: String,
    pub url: String,
    pub homepage: Option<String>,
    pub favicon: Option<String>,
    pub country: String,
    pub countrycode: String,
    pub state: Option<String>,
    pub language: Option<String>,
    /// Comma-separated free text.
    pub tags: Option<String>,
    pub codec: Option<String>,
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub clickcount: u64,
    #[serde(default)]
    pub lastcheckok: u8,
}

impl RawCountry {
    /// Decode one element of the countries array.
    pub fn decode(value: serde_json::Value) -> Result<Self, RecordShapeError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl RawStation {
    /// Decode one element of the stations array.
    ///
    /// Besides the JSON shape, the id and stream URL must be non-blank.
    pub fn decode(value: serde_json::Value) -> Result<Self, RecordShapeError> {
        let raw: RawStation = serde_json::from_value(value)?;
        if raw.stationuuid.trim().is_empty() {
            return Err(RecordShapeError::BlankField("stationuuid"));
        }
        if raw.url.trim().is_empty() {
            return Err(RecordShapeError::BlankField("url"));
        }
        Ok(raw)
    }
}
