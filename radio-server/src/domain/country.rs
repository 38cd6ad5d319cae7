//! Country codes and the country listing entity.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid ISO 3166-1 alpha-2 country code.
///
/// Country codes are always 2 uppercase ASCII letters. This type guarantees
/// that any `CountryCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use radio_server::domain::CountryCode;
///
/// let de = CountryCode::parse("DE").unwrap();
/// assert_eq!(de.as_str(), "DE");
///
/// // Lowercase is rejected by the strict parser
/// assert!(CountryCode::parse("de").is_err());
///
/// // ...but accepted after normalization
/// assert_eq!(CountryCode::parse_normalized(" de ").unwrap(), de);
///
/// // Wrong length is rejected
/// assert!(CountryCode::parse("DEU").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidCountryCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(CountryCode([bytes[0], bytes[1]]))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCountryCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the country code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("??")
    }

    /// Display glyph for this country, or a globe if the code is unmapped.
    pub fn flag(&self) -> &'static str {
        COUNTRY_FLAGS
            .iter()
            .find(|(code, _)| *code == self.as_str())
            .map(|(_, flag)| *flag)
            .unwrap_or(DEFAULT_FLAG)
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Flag shown for countries missing from [`COUNTRY_FLAGS`].
pub const DEFAULT_FLAG: &str = "🌍";

const COUNTRY_FLAGS: &[(&str, &str)] = &[
    ("US", "🇺🇸"),
    ("GB", "🇬🇧"),
    ("FR", "🇫🇷"),
    ("DE", "🇩🇪"),
    ("JP", "🇯🇵"),
    ("AU", "🇦🇺"),
    ("CA", "🇨🇦"),
    ("BR", "🇧🇷"),
    ("IN", "🇮🇳"),
    ("IT", "🇮🇹"),
    ("ES", "🇪🇸"),
    ("RU", "🇷🇺"),
    ("NL", "🇳🇱"),
    ("CH", "🇨🇭"),
    ("SE", "🇸🇪"),
    ("NO", "🇳🇴"),
    ("DK", "🇩🇰"),
    ("FI", "🇫🇮"),
    ("AT", "🇦🇹"),
    ("BE", "🇧🇪"),
    ("PL", "🇵🇱"),
    ("PT", "🇵🇹"),
    ("IE", "🇮🇪"),
    ("MX", "🇲🇽"),
    ("AR", "🇦🇷"),
    ("KR", "🇰🇷"),
    ("CN", "🇨🇳"),
    ("TH", "🇹🇭"),
    ("SG", "🇸🇬"),
    ("MY", "🇲🇾"),
    ("ID", "🇮🇩"),
    ("PH", "🇵🇭"),
    ("VN", "🇻🇳"),
    ("TW", "🇹🇼"),
    ("HK", "🇭🇰"),
    ("NZ", "🇳🇿"),
    ("ZA", "🇿🇦"),
    ("EG", "🇪🇬"),
    ("IL", "🇮🇱"),
    ("TR", "🇹🇷"),
    ("GR", "🇬🇷"),
    ("CZ", "🇨🇿"),
    ("HU", "🇭🇺"),
    ("RO", "🇷🇴"),
    ("BG", "🇧🇬"),
    ("HR", "🇭🇷"),
    ("SI", "🇸🇮"),
    ("SK", "🇸🇰"),
    ("LT", "🇱🇹"),
    ("LV", "🇱🇻"),
    ("EE", "🇪🇪"),
    ("IS", "🇮🇸"),
    ("MT", "🇲🇹"),
    ("CY", "🇨🇾"),
    ("LU", "🇱🇺"),
];

/// A country that has radio stations in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: CountryCode,
    pub name: String,
    pub flag: &'static str,
    pub station_count: u32,
}

impl Country {
    /// Create a country entry, looking up its flag from the code.
    pub fn new(code: CountryCode, name: impl Into<String>, station_count: u32) -> Self {
        Self {
            code,
            name: name.into(),
            flag: code.flag(),
            station_count,
        }
    }
}
