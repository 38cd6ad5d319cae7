//! Station transform pipeline.
//!
//! Derives the display fields of a [`RadioStation`] from a raw upstream
//! record. Every function here is pure and total: missing or odd input
//! degrades to a documented default rather than an error.

use sha2::{Digest, Sha256};

use crate::directory::RawStation;
use crate::domain::RadioStation;

/// Genre label used when a station has no tags.
pub const DEFAULT_GENRE: &str = "Music";

/// Tag substrings and the genre they map to.
///
/// Order matters: the first substring found in the tags wins, so e.g.
/// "pop" beats "rock" for a station tagged "rock,pop".
const GENRE_TABLE: &[(&str, &str)] = &[
    ("news", "News/Talk"),
    ("talk", "News/Talk"),
    ("pop", "Pop"),
    ("rock", "Rock"),
    ("classical", "Classical"),
    ("jazz", "Jazz"),
    ("country", "Country"),
    ("hip hop", "Hip Hop"),
    ("electronic", "Electronic"),
    ("dance", "Dance"),
    ("folk", "Folk"),
    ("alternative", "Alternative"),
    ("indie", "Indie"),
    ("metal", "Metal"),
    ("punk", "Punk"),
    ("reggae", "Reggae"),
    ("blues", "Blues"),
    ("oldies", "Oldies"),
    ("world", "World Music"),
    ("latin", "Latin"),
    ("christian", "Christian"),
    ("sports", "Sports"),
    ("variety", "Variety"),
];

/// Lower edge of the FM band, in MHz.
const FM_MIN: f64 = 88.1;
/// Width of the FM band we spread stations over.
const FM_SPAN: f64 = 19.8;
/// Number of distinct hash buckets mapped onto the band.
const FM_BUCKETS: u64 = 1000;

/// Build the client-facing station from a validated upstream record.
pub fn transform_station(raw: RawStation) -> RadioStation {
    let tags = raw.tags.as_deref();

    RadioStation {
        frequency: frequency(&raw.stationuuid),
        genre: genre(tags),
        listeners: listeners(raw.clickcount),
        description: description(tags, &raw.country),
        id: raw.stationuuid,
        name: raw.name,
        url: raw.url,
        favicon: raw.favicon,
        homepage: raw.homepage,
        country: raw.country,
        countrycode: raw.countrycode,
        language: raw.language,
        bitrate: raw.bitrate,
        codec: raw.codec,
        votes: raw.votes,
        clickcount: raw.clickcount,
        lastcheckok: raw.lastcheckok,
    }
}

/// Pick a genre label for a comma-separated tag string.
///
/// ```
/// use radio_server::transform::genre;
///
/// assert_eq!(genre(Some("smooth jazz,lounge")), "Jazz");
/// assert_eq!(genre(Some("chillout,ambient")), "Chillout");
/// assert_eq!(genre(None), "Music");
/// ```
pub fn genre(tags: Option<&str>) -> String {
    let Some(tags) = tags.filter(|t| !t.is_empty()) else {
        return DEFAULT_GENRE.to_string();
    };

    let lower = tags.to_lowercase();
    if let Some((_, label)) = GENRE_TABLE.iter().find(|(needle, _)| lower.contains(needle)) {
        return (*label).to_string();
    }

    match split_tags(tags).next() {
        Some(first) if !first.is_empty() => title_case(first),
        _ => DEFAULT_GENRE.to_string(),
    }
}

/// A stable pseudo FM frequency for a station id, e.g. `"101.3 FM"`.
///
/// Purely cosmetic: the same id always yields the same value, and the value
/// lies in `[88.1, 107.9]`.
pub fn frequency(station_id: &str) -> String {
    let digest = Sha256::digest(station_id.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let bucket = u64::from_be_bytes(prefix) % FM_BUCKETS;

    let mhz = FM_MIN + (bucket as f64 / FM_BUCKETS as f64) * FM_SPAN;
    format!("{mhz:.1} FM")
}

/// Human-readable listener count from a click count.
///
/// Thousands and tenths of millions round half to even; a count that would
/// round to `1000K` is shown in millions instead.
///
/// ```
/// use radio_server::transform::listeners;
///
/// assert_eq!(listeners(42), "42");
/// assert_eq!(listeners(1500), "2K");
/// assert_eq!(listeners(2500), "2K");
/// assert_eq!(listeners(999_999), "1.0M");
/// assert_eq!(listeners(2_340_000), "2.3M");
/// ```
pub fn listeners(clickcount: u64) -> String {
    if clickcount >= 999_500 {
        let tenths = round_half_even(clickcount, 100_000);
        format!("{}.{}M", tenths / 10, tenths % 10)
    } else if clickcount >= 1_000 {
        format!("{}K", round_half_even(clickcount, 1_000))
    } else {
        clickcount.to_string()
    }
}

/// `n / unit` rounded to the nearest integer, ties to even.
fn round_half_even(n: u64, unit: u64) -> u64 {
    let (quotient, remainder) = (n / unit, n % unit);
    let twice = remainder * 2;
    if twice > unit || (twice == unit && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Short description built from the first three tags and the country.
///
/// Tags are taken positionally: an empty piece stays in the list.
pub fn description(tags: Option<&str>, country: &str) -> String {
    match tags {
        Some(tags) if !tags.is_empty() => {
            let labels: Vec<String> = split_tags(tags).take(3).map(title_case).collect();
            format!("{} from {country}", labels.join(", "))
        }
        _ => format!("Radio station from {country}"),
    }
}

/// Trimmed comma-separated pieces of a tag string, blanks included.
fn split_tags(tags: &str) -> impl Iterator<Item = &str> {
    tags.split(',').map(str::trim)
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
///
/// `"hip-hop"` becomes `"Hip-Hop"` and `"80S POP"` becomes `"80S Pop"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
