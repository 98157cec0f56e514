//! Integration tests for parsing Polsu response bodies.
//!
//! The fixtures carry `code` already, as they look after the client has
//! written the HTTP status into them.

use polsu_api::models::{BedwarsDreams, BedwarsMap, PolsuResponse, Session};
use seraph_core::DefaultEnvelope;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read fixture at {}: {}",
            fixture_path.display(),
            e
        )
    })
}

/// Parse a fixture, reporting the body on failure.
fn parse_fixture<T: DeserializeOwned>(name: &str) -> T {
    let json_data = load_fixture(name);
    serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!(
            "Failed to deserialize fixture {}: {}\nJSON: {}",
            name, e, json_data
        )
    })
}

#[test]
fn test_deserialize_session() {
    let response: PolsuResponse<Session> = parse_fixture("session.json");

    assert!(response.is_success());
    assert_eq!(response.timestamp_ms(), None);

    let session = response.data().unwrap();
    assert_eq!(session.session, 12);
    assert_eq!(session.games.fours, 9);
    assert_eq!(session.resources.emeralds, 27);
    assert_eq!(session.purchased.nonpermanent, 118);
    assert_eq!(session.stats.fkills, 33);
    assert_eq!(session.last_checked.timestamp, 1_697_031_800);
    assert_eq!(session.player.username, "Arman");
    assert_eq!(session.player.last_changed, Some(1_650_000_000));
    assert!(!session.new);
}

#[test]
fn test_deserialize_bedwars_map() {
    let response: PolsuResponse<BedwarsMap> = parse_fixture("bedwars_map.json");

    let map = response.data().unwrap();
    assert_eq!(map.name, "Lucky Rush");
    assert_eq!(map.reskin_of, "None");
    assert_eq!(map.max_build, 105);
    assert_eq!(map.build_radius, 75);
    assert!(map.in_rotation);
}

#[test]
fn test_deserialize_dreams() {
    let response: PolsuResponse<BedwarsDreams> = parse_fixture("dreams.json");

    let dreams = response.data().unwrap();
    assert_eq!(dreams.len(), 2);
    assert_eq!(dreams["2023"]["SEPTEMBER"].len(), 2);
    assert_eq!(dreams["2023"]["OCTOBER"][0].mode, "Lucky");
    assert_eq!(dreams["2022"]["DECEMBER"][0].date, 1_669_852_800);
}

#[test]
fn test_missing_success_flag_is_rejected() {
    let result = serde_json::from_str::<PolsuResponse<Session>>(r#"{"code": 200, "data": {}}"#);
    assert!(result.is_err());
}
