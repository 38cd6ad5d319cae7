//! Unit tests for the aggregation service.

use super::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

fn code(s: &str) -> CountryCode {
    CountryCode::parse(s).unwrap()
}

fn outage() -> DirectoryError {
    DirectoryError::Api {
        status: 503,
        message: "upstream down".to_string(),
    }
}

fn raw_country(name: &str, iso: &str, count: u32) -> Value {
    json!({"name": name, "iso_3166_1": iso, "stationcount": count})
}

fn raw_station(id: &str, tags: Option<&str>, clickcount: u64) -> Value {
    json!({
        "stationuuid": id,
        "name": format!("Station {id}"),
        "url": format!("http://streams.example.com/{id}"),
        "homepage": "http://example.com",
        "favicon": null,
        "country": "Germany",
        "countrycode": "DE",
        "language": "german",
        "tags": tags,
        "codec": "MP3",
        "bitrate": 128,
        "votes": 3,
        "clickcount": clickcount,
        "lastcheckok": 1
    })
}

/// Mock directory for testing.
///
/// A `None` response simulates an unreachable upstream.
struct MockDirectory {
    countries: Mutex<Option<Vec<Value>>>,
    stations: Mutex<HashMap<CountryCode, Option<Vec<Value>>>>,
    country_calls: Mutex<usize>,
    station_calls: Mutex<usize>,
}

impl MockDirectory {
    fn new() -> Self {
        Self {
            countries: Mutex::new(Some(Vec::new())),
            stations: Mutex::new(HashMap::new()),
            country_calls: Mutex::new(0),
            station_calls: Mutex::new(0),
        }
    }

    fn set_countries(&self, records: Option<Vec<Value>>) {
        *self.countries.lock().unwrap() = records;
    }

    fn set_stations(&self, country: CountryCode, records: Option<Vec<Value>>) {
        self.stations.lock().unwrap().insert(country, records);
    }

    fn country_call_count(&self) -> usize {
        *self.country_calls.lock().unwrap()
    }

    fn station_call_count(&self) -> usize {
        *self.station_calls.lock().unwrap()
    }
}

impl StationDirectory for MockDirectory {
    async fn fetch_countries(&self) -> Result<Vec<Value>, DirectoryError> {
        *self.country_calls.lock().unwrap() += 1;
        self.countries.lock().unwrap().clone().ok_or_else(outage)
    }

    async fn fetch_stations(
        &self,
        country: CountryCode,
        limit: u16,
    ) -> Result<Vec<Value>, DirectoryError> {
        *self.station_calls.lock().unwrap() += 1;
        let stations = self.stations.lock().unwrap();
        match stations.get(&country) {
            Some(Some(records)) => Ok(records.iter().take(limit as usize).cloned().collect()),
            Some(None) => Err(outage()),
            None => Ok(Vec::new()),
        }
    }
}

fn service(mock: MockDirectory) -> RadioService<MockDirectory> {
    RadioService::with_directory(mock, &CacheConfig::default())
}

#[tokio::test]
async fn countries_are_filtered_sorted_and_truncated() {
    let mock = MockDirectory::new();
    // 70 countries AA.., counts 5..=74, plus a few below the threshold
    let mut records: Vec<Value> = (0..70u32)
        .map(|i| {
            let iso = format!(
                "{}{}",
                (b'A' + (i / 26) as u8) as char,
                (b'A' + (i % 26) as u8) as char
            );
            raw_country(&format!("Country {i}"), &iso, 5 + i)
        })
        .collect();
    records.push(raw_country("Tiny", "TI", 9));
    records.push(raw_country("Threshold", "TH", 10));
    mock.set_countries(Some(records));
    let service = service(mock);

    let countries = service.get_countries().await;

    assert_eq!(countries.len(), 50);
    assert!(countries.iter().all(|c| c.station_count >= 10));
    assert!(
        countries
            .windows(2)
            .all(|w| w[0].station_count >= w[1].station_count)
    );
    assert_eq!(countries[0].station_count, 74);
}

#[tokio::test]
async fn small_listing_keeps_threshold_country() {
    let mock = MockDirectory::new();
    mock.set_countries(Some(vec![
        raw_country("Tiny", "TI", 9),
        raw_country("Threshold", "QQ", 10),
        raw_country("Germany", "DE", 6000),
    ]));
    let service = service(mock);

    let countries = service.get_countries().await;
    let codes: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["DE", "QQ"]);
    assert_eq!(countries[0].flag, "🇩🇪");
    assert_eq!(countries[1].flag, crate::domain::DEFAULT_FLAG);
}

#[tokio::test]
async fn invalid_country_records_are_skipped() {
    let mock = MockDirectory::new();
    mock.set_countries(Some(vec![
        raw_country("Germany", "DE", 6000),
        json!({"name": "Missing code", "stationcount": 500}),
        raw_country("Bad code", "XYZ", 400),
        json!("not an object"),
        raw_country("France", "fr", 5000),
    ]));
    let service = service(mock);

    let countries = service.get_countries().await;
    let codes: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["DE", "FR"]);
}

#[tokio::test]
async fn countries_are_cached() {
    let mock = MockDirectory::new();
    mock.set_countries(Some(vec![raw_country("Germany", "DE", 6000)]));
    let service = service(mock);

    let first = service.get_countries().await;
    let second = service.get_countries().await;

    assert_eq!(first, second);
    assert_eq!(service.directory().country_call_count(), 1);
    assert!(service.is_cached(&CacheKey::Countries));
}

#[tokio::test]
async fn countries_fallback_on_upstream_error_is_not_cached() {
    let mock = MockDirectory::new();
    mock.set_countries(None);
    let service = service(mock);

    let countries = service.get_countries().await;
    assert_eq!(*countries, fallback_countries());
    assert_eq!(countries.len(), 10);
    let us = countries.iter().find(|c| c.code.as_str() == "US").unwrap();
    assert_eq!(us.station_count, 12000);
    assert!(!service.is_cached(&CacheKey::Countries));

    // Upstream recovers within the TTL window: it must be asked again
    service
        .directory()
        .set_countries(Some(vec![raw_country("Japan", "JP", 900)]));
    let countries = service.get_countries().await;
    assert_eq!(service.directory().country_call_count(), 2);
    assert_eq!(countries.len(), 1);
    assert_eq!(countries[0].code.as_str(), "JP");
}

#[test]
fn fallback_list_shape() {
    let countries = fallback_countries();
    assert_eq!(countries.len(), 10);
    assert!(
        countries
            .windows(2)
            .all(|w| w[0].station_count >= w[1].station_count)
    );
    assert!(countries.iter().all(|c| c.flag != crate::domain::DEFAULT_FLAG));
}

#[tokio::test]
async fn stations_are_transformed() {
    let mock = MockDirectory::new();
    mock.set_stations(
        code("DE"),
        Some(vec![
            raw_station("a", Some("jazz,blues"), 1_500),
            raw_station("b", None, 42),
        ]),
    );
    let service = service(mock);

    let stations = service.get_stations_by_country(code("DE"), 20).await;

    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].id, "a");
    assert_eq!(stations[0].genre, "Jazz");
    assert_eq!(stations[0].listeners, "2K");
    assert_eq!(stations[0].description, "Jazz, Blues from Germany");
    assert_eq!(stations[1].genre, "Music");
    assert_eq!(stations[1].listeners, "42");
    assert_eq!(stations[1].description, "Radio station from Germany");
}

#[tokio::test]
async fn stations_are_idempotent_within_ttl() {
    let mock = MockDirectory::new();
    mock.set_stations(
        code("US"),
        Some((0..15).map(|i| raw_station(&format!("us-{i}"), Some("pop"), 1000 - i)).collect()),
    );
    let service = service(mock);

    let first = service.get_stations_by_country(code("US"), 10).await;
    let second = service.get_stations_by_country(code("US"), 10).await;

    assert_eq!(first.len(), 10);
    assert_eq!(first, second);
    assert_eq!(service.directory().station_call_count(), 1);
}

#[tokio::test]
async fn station_cache_key_includes_limit() {
    let mock = MockDirectory::new();
    mock.set_stations(
        code("US"),
        Some((0..15).map(|i| raw_station(&format!("us-{i}"), None, 0)).collect()),
    );
    let service = service(mock);

    let ten = service.get_stations_by_country(code("US"), 10).await;
    let five = service.get_stations_by_country(code("US"), 5).await;

    assert_eq!(ten.len(), 10);
    assert_eq!(five.len(), 5);
    assert_eq!(service.directory().station_call_count(), 2);
    assert!(service.is_cached(&CacheKey::Stations {
        country: code("US"),
        limit: 5
    }));
}

#[tokio::test]
async fn stations_empty_on_upstream_error_and_not_cached() {
    let mock = MockDirectory::new();
    mock.set_stations(code("DE"), None);
    let service = service(mock);

    let stations = service.get_stations_by_country(code("DE"), 20).await;
    assert!(stations.is_empty());

    let _ = service.get_stations_by_country(code("DE"), 20).await;
    assert_eq!(service.directory().station_call_count(), 2);
}

#[tokio::test]
async fn invalid_station_records_are_skipped() {
    let mock = MockDirectory::new();
    mock.set_stations(
        code("DE"),
        Some(vec![
            raw_station("good", Some("rock"), 10),
            json!({"stationuuid": "no-url", "name": "x", "country": "Germany", "countrycode": "DE"}),
            raw_station("", Some("rock"), 10),
            json!({"stationuuid": "neg", "name": "x", "url": "http://x", "country": "Germany",
                   "countrycode": "DE", "clickcount": -1}),
        ]),
    );
    let service = service(mock);

    let stations = service.get_stations_by_country(code("DE"), 20).await;
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].id, "good");
}

#[tokio::test]
async fn entries_expire_after_ttl() {
    let mock = MockDirectory::new();
    mock.set_countries(Some(vec![raw_country("Germany", "DE", 6000)]));
    let config = CacheConfig::default().with_ttl(Duration::from_millis(50));
    let service = RadioService::with_directory(mock, &config);

    service.get_countries().await;
    tokio::time::sleep(Duration::from_millis(120)).await;
    service.get_countries().await;

    assert_eq!(service.directory().country_call_count(), 2);
}

#[tokio::test]
async fn concurrent_misses_agree() {
    let mock = MockDirectory::new();
    mock.set_stations(code("FR"), Some(vec![raw_station("fr-1", Some("news"), 7)]));
    let service = service(mock);

    let (a, b) = tokio::join!(
        service.get_stations_by_country(code("FR"), 10),
        service.get_stations_by_country(code("FR"), 10)
    );

    assert_eq!(a, b);
    let calls = service.directory().station_call_count();
    assert!((1..=2).contains(&calls));
}

#[tokio::test]
async fn invalidate_cache_forces_refetch() {
    let mock = MockDirectory::new();
    mock.set_countries(Some(vec![raw_country("Germany", "DE", 6000)]));
    let service = service(mock);

    service.get_countries().await;
    service.invalidate_cache();
    service.get_countries().await;

    assert_eq!(service.directory().country_call_count(), 2);
}

#[test]
fn fold_records_counts_skips() {
    let records = vec![
        raw_country("Germany", "DE", 6000),
        json!(null),
        raw_country("Nowhere", "1X", 10),
        raw_country("Italy", "IT", 2500),
    ];

    let batch = fold_records(records, "country", country_from_record);

    assert_eq!(batch.kept.len(), 2);
    assert_eq!(batch.skipped, 2);
}

#[test]
fn rank_countries_is_stable_for_ties() {
    let countries = vec![
        Country::new(code("AA"), "A", 100),
        Country::new(code("BB"), "B", 200),
        Country::new(code("CC"), "C", 100),
    ];

    let ranked = rank_countries(countries);
    let codes: Vec<&str> = ranked.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["BB", "AA", "CC"]);
}

#[tokio::test]
async fn open_and_close() {
    let config = ServiceConfig {
        directory: DirectoryConfig::new().with_base_url("http://127.0.0.1:1/json"),
        cache: CacheConfig::default(),
    };
    let service = RadioService::open(config).unwrap();

    // Nothing listens on port 1: the fallback list is served
    let countries = service.get_countries().await;
    assert_eq!(countries.len(), 10);

    service.close();
}
