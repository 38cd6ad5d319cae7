//! The normalized station entity served to clients.

use serde::Serialize;

/// A radio station in the client-facing schema.
///
/// `frequency`, `genre`, `listeners` and `description` are display values
/// derived from the upstream record (see [`crate::transform`]). The
/// frequency is not real broadcast metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioStation {
    /// Upstream station UUID.
    pub id: String,
    pub name: String,
    pub frequency: String,
    pub genre: String,
    /// Stream URL.
    pub url: String,
    pub listeners: String,
    pub description: String,
    pub favicon: Option<String>,
    pub homepage: Option<String>,
    pub country: String,
    pub countrycode: String,
    pub language: Option<String>,
    pub bitrate: Option<u32>,
    pub codec: Option<String>,
    pub votes: u64,
    pub clickcount: u64,
    pub lastcheckok: u8,
}
